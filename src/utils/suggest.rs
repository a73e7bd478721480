//! "Did you mean" ranking for tool and field names.

fn normalize(value: &str) -> Vec<char> {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn edit_distance(a: &[char], b: &[char]) -> usize {
    if a == b {
        return 0;
    }
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn score(input: &[char], candidate: &str) -> Option<usize> {
    let candidate = normalize(candidate);
    if input.is_empty() || candidate.is_empty() {
        return None;
    }
    let input_str: String = input.iter().collect();
    let candidate_str: String = candidate.iter().collect();
    if input_str == candidate_str {
        return Some(0);
    }
    if candidate_str.contains(&input_str) || input_str.contains(&candidate_str) {
        return Some(1);
    }
    Some(edit_distance(input, &candidate))
}

fn max_distance(len: usize) -> usize {
    match len {
        0 => 0,
        1..=4 => 1,
        5..=8 => 2,
        _ => ((len as f32) * 0.35).floor().max(3.0) as usize,
    }
}

/// Closest candidates to `input`, best first, at most `limit`.
pub fn suggest(input: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let normalized = normalize(input);
    if normalized.is_empty() || candidates.is_empty() {
        return Vec::new();
    }
    let allowed = max_distance(normalized.len());
    let mut scored: Vec<(&String, usize)> = candidates
        .iter()
        .filter_map(|c| score(&normalized, c).map(|s| (c, s)))
        .filter(|(_, s)| *s <= allowed)
        .collect();
    scored.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| a.0.len().cmp(&b.0.len()))
            .then_with(|| a.0.cmp(b.0))
    });
    let mut out: Vec<String> = Vec::new();
    for (candidate, _) in scored {
        if !out.contains(candidate) {
            out.push(candidate.clone());
        }
        if out.len() >= limit.max(1) {
            break;
        }
    }
    out
}
