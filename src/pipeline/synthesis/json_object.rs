/// Returns the first balanced `{...}` object in a completion response.
///
/// Tolerates prose and markdown fences around the object. Braces inside JSON
/// strings (including escaped quotes) do not count toward the balance. An
/// opening brace that never closes is skipped and the scan resumes after it.
pub fn extract_first_object(raw: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = raw[from..].find('{') {
        let start = from + found;
        if let Some(end) = balanced_end(&raw[start..]) {
            return Some(&raw[start..start + end]);
        }
        from = start + 1;
    }
    None
}

/// Byte length of the object opening at the start of `candidate`, if it closes.
fn balanced_end(candidate: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in candidate.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}
