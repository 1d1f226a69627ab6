use std::{env, process::ExitCode};

use darija_translate::{Direction, DisplayLanguage, HistoryItem, TranslationClient};
use log::error;

fn main() -> ExitCode {
    env_logger::init();

    let client = match TranslationClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut args = env::args().skip(1);
    let (direction, lang, text) = match (args.next(), args.next(), args.next()) {
        (Some(direction), Some(lang), Some(text)) => (direction, lang, text),
        _ => {
            match client.supported_languages(DisplayLanguage::En) {
                Ok(languages) => {
                    for language in languages {
                        println!("{}\t{}", language.code, language.label);
                    }
                    return ExitCode::SUCCESS;
                }
                Err(err) => {
                    error!("{err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let direction = match direction.as_str() {
        "darija-to-lang" => Direction::DarijaToLang,
        "lang-to-darija" => Direction::LangToDarija,
        other => {
            error!("unknown direction `{other}`, use darija-to-lang or lang-to-darija");
            return ExitCode::FAILURE;
        }
    };

    let (source, target) = direction.language_pair(&lang);
    match client.translate_text(&text, &source, &target) {
        Ok(output) => {
            let item = HistoryItem::new(text, output);
            println!("{}", item.output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
