//! Delimiter sniffing over a sample of the input.

/// Infer the field delimiter from a text sample.
///
/// Each candidate is scored by how consistently it occurs across the
/// sample's lines, ignoring occurrences inside quotes. Returns `None` when no
/// candidate appears on the first line.
pub fn sniff_delimiter(sample: &str, candidates: &[u8], quote: u8, truncated: bool) -> Option<u8> {
    let mut lines: Vec<&str> = sample
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();

    // The last line of a cut sample is usually partial.
    if truncated && lines.len() > 1 {
        lines.pop();
    }

    if lines.is_empty() {
        return None;
    }

    let mut best: Option<u8> = None;
    let mut best_score = 0;

    for &delim in candidates {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Tabs rarely occur inside values, so they win ties.
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        tracing::debug!(delimiter = %(delim as char).escape_default(), score, "delimiter candidate");

        if score > best_score {
            best_score = score;
            best = Some(delim);
        }
    }

    best
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == quote_char {
            in_quotes = !in_quotes;
        } else if ch == delim_char && !in_quotes {
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: &[u8] = b",;\t|:";

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n", CANDIDATES, b'"', false), Some(b';'));
    }

    #[test]
    fn test_sniff_tab() {
        assert_eq!(sniff_delimiter("a\tb\n1\t2\n", CANDIDATES, b'"', false), Some(b'\t'));
    }

    #[test]
    fn test_sniff_pipe_ignores_quoted() {
        let sample = "name|note\n\"x|y\"|1\nz|2\n";
        assert_eq!(sniff_delimiter(sample, CANDIDATES, b'"', false), Some(b'|'));
        assert_eq!(count_delimiter_in_line("\"x|y\"|1", b'|', b'"'), 1);
    }

    #[test]
    fn test_sniff_prefers_consistent_counts() {
        // ':' appears in times on some lines only; ';' is the real split.
        let sample = "id;at\n1;10:30\n2;noon\n3;11:45\n";
        assert_eq!(sniff_delimiter(sample, CANDIDATES, b'"', false), Some(b';'));
    }

    #[test]
    fn test_sniff_drops_partial_last_line() {
        let sample = "a;b\n1;2\n3;4;5;6;7";
        assert_eq!(sniff_delimiter(sample, CANDIDATES, b'"', true), Some(b';'));
    }

    #[test]
    fn test_sniff_nothing() {
        assert_eq!(sniff_delimiter("single\nvalues\n", CANDIDATES, b'"', false), None);
        assert_eq!(sniff_delimiter("", CANDIDATES, b'"', false), None);
    }
}
