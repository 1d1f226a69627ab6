pub mod languages;

#[cfg(test)]
pub mod test_server;
