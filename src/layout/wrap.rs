use crate::fonts::shaper::TextMeasure;

/// Greedily wrap `text` into lines no wider than `max_width` pixels.
///
/// Words are maximal runs of non-whitespace; any whitespace (newlines included) separates words
/// and collapses to a single space. A word wider than `max_width` is emitted on its own line
/// unsplit. Empty or all-whitespace input yields no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, measure: &mut M, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if measure.measure(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_owned();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
