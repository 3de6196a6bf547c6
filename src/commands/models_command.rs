use crate::registry::ModelRegistry;
use crate::AppResult;
use console::{pad_str, Alignment, Style, Term};
use rvstruct::ValueStruct;

#[derive(Debug, Clone)]
pub struct ModelsCommandOptions {
    pub json_output: bool,
}

pub fn command_models(term: &Term, options: ModelsCommandOptions) -> AppResult<usize> {
    let registry = ModelRegistry::builtin()?;

    if options.json_output {
        term.write_line(serde_json::to_string_pretty(registry.entries())?.as_str())?;
        return Ok(registry.len());
    }

    let bold_style = Style::new().bold();
    let dimmed_style = Style::new().dim();
    let max_model_width = registry
        .entries()
        .iter()
        .map(|entry| entry.model_id.value().len())
        .max()
        .unwrap_or(10)
        .max(5)
        + 5;

    term.write_line(
        format!(
            "  {} {}",
            dimmed_style.apply_to(pad_str("Model", max_model_width, Alignment::Left, None)),
            dimmed_style.apply_to("URL"),
        )
        .as_str(),
    )?;
    for entry in registry.entries() {
        term.write_line(
            format!(
                "- {} {}",
                bold_style.clone().white().apply_to(pad_str(
                    entry.model_id.value(),
                    max_model_width,
                    Alignment::Left,
                    None
                )),
                entry.url
            )
            .as_str(),
        )?;
    }
    term.write_line(
        format!(
            "\n{} models registered.",
            bold_style.clone().green().apply_to(registry.len())
        )
        .as_str(),
    )?;
    Ok(registry.len())
}
