//! English inflection for resource and relationship names.
//!
//! Only the rules resource names need: relationship fields are plural
//! `snake_case` (`threshold_values`) and type names are singular
//! `CamelCase` (`ThresholdValue`). Collection and element names are derived
//! from the type name the other way round.

/// Words whose plural does not follow the suffix rules, as (singular, plural).
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("status", "statuses"),
];

/// Words with identical singular and plural forms.
const UNCOUNTABLE: &[&str] = &["equipment", "information", "series", "species", "metadata"];

/// Converts `snake_case` to `CamelCase`.
///
/// ```rust
/// use newrelic_api::rest::inflect::camelize;
///
/// assert_eq!(camelize("threshold_values"), "ThresholdValues");
/// ```
#[must_use]
pub fn camelize(word: &str) -> String {
    word.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

/// Converts `CamelCase` to `snake_case`.
///
/// ```rust
/// use newrelic_api::rest::inflect::underscore;
///
/// assert_eq!(underscore("AccountView"), "account_view");
/// ```
#[must_use]
pub fn underscore(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut prev_lower = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}

/// Singulars whose plural also fits a more common suffix rule, such as
/// `caches` (`cach`), `movies` (`movy`) and `buses` (`buse`).
const AMBIGUOUS_SINGULARS: &[&str] = &[
    "alias", "atlas", "avalanche", "bonus", "brownie", "bus", "cache", "calorie", "campus",
    "canvas", "census", "cookie", "corpus", "gas", "genie", "headache", "hoodie", "lens",
    "movie", "niche", "pie", "plus", "quiche", "rookie", "selfie", "tie", "virus", "zombie",
];

/// Returns the singular form of the last word in `word`.
///
/// Case is preserved, so this works on both `snake_case` and `CamelCase`.
/// This is the first of [`singular_candidates`].
///
/// ```rust
/// use newrelic_api::rest::inflect::singularize;
///
/// assert_eq!(singularize("ThresholdValues"), "ThresholdValue");
/// assert_eq!(singularize("caches"), "cache");
/// ```
#[must_use]
pub fn singularize(word: &str) -> String {
    singular_candidates(word)
        .into_iter()
        .next()
        .unwrap_or_else(|| word.to_string())
}

/// Returns every plausible singular of the last word in `word`, most likely
/// first.
///
/// A candidate is kept only if [`pluralize`] maps it back to `word`, or if
/// it is `word` itself. Never empty.
///
/// ```rust
/// use newrelic_api::rest::inflect::singular_candidates;
///
/// assert_eq!(singular_candidates("matches"), ["match", "matche"]);
/// assert_eq!(singular_candidates("Caches"), ["Cache", "Cach"]);
/// ```
#[must_use]
pub fn singular_candidates(word: &str) -> Vec<String> {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || !last.is_ascii() || UNCOUNTABLE.contains(&lower.as_str()) {
        return vec![word.to_string()];
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return vec![format!("{head}{}", match_case(last, singular))];
    }

    let mut stems: Vec<String> = Vec::new();
    for (strip, append) in suffix_rules(&lower) {
        if *strip >= last.len() {
            continue;
        }
        let stem = format!("{}{append}", &last[..last.len() - strip]);
        let round_trips = *strip == 0 || pluralize(&stem).eq_ignore_ascii_case(last);
        if round_trips && !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    if stems.is_empty() {
        stems.push(last.to_string());
    }

    // Known ambiguous singulars go first; the sort is stable
    stems.sort_by_key(|stem| !AMBIGUOUS_SINGULARS.contains(&stem.to_ascii_lowercase().as_str()));

    stems
        .into_iter()
        .map(|stem| format!("{head}{stem}"))
        .collect()
}

/// Suffix rewrites for a lowercase plural, as (characters to strip, text to
/// append), in order of preference.
fn suffix_rules(lower: &str) -> &'static [(usize, &'static str)] {
    if lower.len() > 3 && lower.ends_with("ies") {
        &[(3, "y"), (1, "")]
    } else if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
        || lower.ends_with("zes")
    {
        &[(2, ""), (1, "")]
    } else if lower.ends_with("ses") {
        &[(1, ""), (2, "")]
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        &[(0, ""), (1, "")]
    } else if lower.ends_with('s') {
        &[(1, "")]
    } else {
        &[(0, "")]
    }
}

/// Returns the plural form of the last word in `word`.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    let lower = last.to_ascii_lowercase();

    if last.is_empty() || !last.is_ascii() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{head}{}", match_case(last, plural));
    }

    let ends_consonant_y = lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u') | None
        );

    if ends_consonant_y {
        format!("{head}{}ies", &last[..last.len() - 1])
    } else if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{head}{last}es")
    } else {
        format!("{head}{last}s")
    }
}

/// Splits off the last word: after the final `_`, or from the final
/// uppercase letter in `CamelCase`.
fn split_last_word(word: &str) -> (&str, &str) {
    let start = word.rfind('_').map_or_else(
        || {
            word.char_indices()
                .filter(|(_, c)| c.is_uppercase())
                .map(|(i, _)| i)
                .last()
                .unwrap_or(0)
        },
        |i| i + 1,
    );
    word.split_at(start)
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        camelize(replacement)
    } else {
        replacement.to_string()
    }
}
