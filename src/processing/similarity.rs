//! Jaro-Winkler similarity used for fuzzy job-title matching

/// Longest common prefix rewarded by the Winkler boost
const MAX_PREFIX: usize = 4;
const PREFIX_SCALE: f64 = 0.1;

/// Jaro-Winkler similarity of two pre-lowercased strings, in `[0, 1]`.
///
/// Identical strings score exactly `1.0`. An empty side scores `0.0`, as
/// does any pair whose match window `floor(max_len / 2) - 1` would be
/// negative. The result is symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let jaro = match jaro(&a_chars, &b_chars) {
        Some(score) => score,
        None => return 0.0,
    };

    let prefix = a_chars
        .iter()
        .zip(b_chars.iter())
        .take_while(|(x, y)| x == y)
        .count()
        .min(MAX_PREFIX);

    let score = jaro + PREFIX_SCALE * prefix as f64 * (1.0 - jaro);
    score.clamp(0.0, 1.0)
}

/// Plain Jaro score; `None` when the match window is negative
fn jaro(a: &[char], b: &[char]) -> Option<f64> {
    let match_window = (a.len().max(b.len()) / 2) as isize - 1;
    if match_window < 0 {
        return None;
    }
    let window = match_window as usize;

    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ac) in a.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b.len());
        for j in start..end {
            if b_matched[j] || b[j] != *ac {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return Some(0.0);
    }

    // Matched characters of both sides, compared in order
    let a_seq = a.iter().zip(&a_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let out_of_order = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = out_of_order as f64 / 2.0;
    Some((m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0)
}

/// Round to two decimals, the precision reported for title similarity
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity("growth marketer", "growth marketer"), 1.0);
        assert_eq!(similarity("a", "a"), 1.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("engineer", ""), 0.0);
        assert_eq!(similarity("", "engineer"), 0.0);
    }

    #[test]
    fn test_negative_match_window() {
        assert_eq!(similarity("a", "b"), 0.0);
    }

    #[test]
    fn test_classic_values() {
        assert!((similarity("martha", "marhta") - 0.9611).abs() < 1e-3);
        assert!((similarity("dwayne", "duane") - 0.84).abs() < 1e-3);
        assert!((similarity("dixon", "dicksonx") - 0.8133).abs() < 1e-3);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("software engineer", "senior software engineer"),
            ("growth marketer", "senior growth marketing manager"),
            ("data analyst", "analyst, data"),
            ("crate", "trace"),
            ("abcabc", "cabbac"),
        ];
        for (a, b) in pairs {
            assert!((similarity(a, b) - similarity(b, a)).abs() < 1e-12, "{} / {}", a, b);
        }
    }

    #[test]
    fn test_range() {
        let words = ["", "a", "ab", "product manager", "qa", "zzzzzzzzzzzzzzzzzzzz"];
        for a in words {
            for b in words {
                let s = similarity(a, b);
                assert!(s.is_finite());
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_title_overlap() {
        assert!(similarity("growth marketer", "senior growth marketing manager") > 0.5);
        assert!(similarity("growth marketer", "growth marketing manager") > 0.9);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.8567), 0.86);
        assert_eq!(round2(1.0), 1.0);
    }
}
