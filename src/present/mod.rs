// Rendering of analysis outcomes: terminal, HTML page and shared formatting
pub mod html;
pub mod terminal;

/// Rounds for display only; classification always uses the raw value.
pub fn metric(value: f64) -> String {
    format!("{:.3}", value)
}
