use crate::matching::{MatchPolicy, ModelMatcher, ModelMatcherResult};
use crate::registry::ModelRegistry;
use crate::AppResult;
use console::{Style, Term};
use rvstruct::ValueStruct;

#[derive(Debug, Clone)]
pub struct MatchCommandOptions {
    pub match_policy: MatchPolicy,
    pub json_output: bool,
}

pub fn command_match(
    term: &Term,
    text: &str,
    options: MatchCommandOptions,
) -> AppResult<ModelMatcherResult> {
    let registry = ModelRegistry::builtin()?;
    let result = ModelMatcher::new(&registry, options.match_policy).matches(text);

    if options.json_output {
        term.write_line(serde_json::to_string_pretty(&result)?.as_str())?;
        return Ok(result);
    }

    match &result {
        ModelMatcherResult::Matched(model_match) => {
            let bold_style = Style::new().bold();
            term.write_line(
                format!(
                    "Recognized model: {}\nURL: {}",
                    bold_style.clone().green().apply_to(model_match.model_id.value()),
                    bold_style.apply_to(&model_match.url)
                )
                .as_str(),
            )?;
        }
        ModelMatcherResult::NoMatch => {
            term.write_line(
                format!(
                    "{} in: {}",
                    Style::new()
                        .yellow()
                        .apply_to("No registered device model found"),
                    if text.trim().is_empty() { "none" } else { text }
                )
                .as_str(),
            )?;
        }
    }
    Ok(result)
}
