//! Shared rendering utilities for wizard prompts

use colored::Colorize;
use inquire::ui::{Color, IndexPrefix, RenderConfig, StyleSheet, Styled};

/// Get the standard render config for wizard prompts
pub fn wizard_render_config() -> RenderConfig<'static> {
    RenderConfig::default()
        .with_highlighted_option_prefix(Styled::new("▸ ").with_fg(Color::LightCyan))
        .with_option_index_prefix(IndexPrefix::Simple)
        .with_selected_option(Some(StyleSheet::new().with_fg(Color::LightCyan)))
        .with_scroll_up_prefix(Styled::new("▲ "))
        .with_scroll_down_prefix(Styled::new("▼ "))
}

/// Display the banner printed when a wizard command starts
pub fn display_banner(title: &str) {
    let rule = "═".repeat(63);
    println!();
    println!("{}", rule.bright_cyan());
    println!("{}", format!("{:^63}", title).bright_cyan().bold());
    println!("{}", rule.bright_cyan());
}

/// Display a stage header box
pub fn display_stage_header(stage_number: u8, stage_name: &str, description: &str) {
    let term_width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    let box_width = term_width.clamp(24, 70);
    let inner_width = box_width - 4;

    println!();
    let header = format!("─ Stage {} · {} ", stage_number, stage_name);
    println!(
        "{}{}{}",
        "┌".bright_cyan(),
        header.bright_cyan(),
        "─".repeat(inner_width.saturating_sub(header.chars().count())).bright_cyan()
    );

    for line in textwrap::wrap(description, inner_width - 2) {
        println!("{}  {}", "│".dimmed(), line.white());
    }

    println!("{}{}", "└".dimmed(), "─".repeat(box_width - 1).dimmed());
    println!();
}

/// Line shown when a step was already answered in an earlier run
pub fn display_skipped(what: &str) {
    println!("{} {}", "↷".dimmed(), format!("{} (saved earlier)", what).dimmed());
}

/// Confirmation line after a step completes
pub fn display_confirmation(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Human text for an optional region
pub fn region_phrase(region: Option<&str>) -> String {
    match region {
        Some(region) => format!("in region {}", region),
        None => "with no specific region".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_phrase() {
        assert_eq!(region_phrase(Some("us-east-1")), "in region us-east-1");
        assert_eq!(region_phrase(None), "with no specific region");
    }
}
