use serde::Serialize;

use crate::errors::TranslateError;
use crate::query::{self, QueryDocument, QueryTranslator, SelectParameter};

pub enum Command {
    /// Filter and sort for a SelectParameter JSON payload.
    Translate { select_json: String },
    Filter { select_json: String },
    Sort { select_json: String },
    /// Sort document for a compact `-age,+name` spec.
    SortSpec { spec: String },
}

#[derive(Serialize)]
struct Translation<'a> {
    filter: &'a QueryDocument,
    sort: &'a QueryDocument,
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, TranslateError> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

/// Run one command and return the text to print.
///
/// # Errors
/// Returns an error if the payload is not valid JSON or translation fails.
pub fn run(
    translator: &QueryTranslator,
    cmd: Command,
    pretty: bool,
) -> Result<String, TranslateError> {
    match cmd {
        Command::Translate { select_json } => {
            let param = query::parse_select_json(&select_json)?;
            let (filter, sort) = translator.build(&param)?;
            let out = Translation {
                filter: &filter,
                sort: &sort,
            };
            render(&out, pretty)
        }
        Command::Filter { select_json } => {
            let param = query::parse_select_json(&select_json)?;
            render(&translator.build_filter(&param)?, pretty)
        }
        Command::Sort { select_json } => {
            let param = query::parse_select_json(&select_json)?;
            render(&translator.build_sort(&param), pretty)
        }
        Command::SortSpec { spec } => {
            let param = SelectParameter {
                sort_descriptors: query::parse_sort_spec(&spec),
                ..SelectParameter::default()
            };
            render(&translator.build_sort(&param), pretty)
        }
    }
}
