//! Cardinality of `value[x]` choice elements
//!
//! Serde sees each alternative of a choice element as its own optional
//! field, so "at most one" and "exactly one" are checked after parsing.

/// Choice-element rules of a resource, checked once it has deserialized
pub trait ChoiceRules {
    /// Returns a description of the first violated choice element
    fn check_choices(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Alternatives of one choice element: `(json name, present)`
pub(crate) type Alternatives<'a> = [(&'a str, bool)];

fn present<'a>(alternatives: &'a Alternatives<'a>) -> Vec<&'a str> {
    alternatives
        .iter()
        .filter(|(_, is_present)| *is_present)
        .map(|(name, _)| *name)
        .collect()
}

fn names(alternatives: &Alternatives<'_>) -> String {
    alternatives
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 0..1 choice: fails when more than one alternative is set
pub(crate) fn at_most_one(element: &str, alternatives: &Alternatives<'_>) -> Result<(), String> {
    let found = present(alternatives);
    if found.len() > 1 {
        return Err(format!(
            "{element}[x]: only one of {} may be present, found {}",
            names(alternatives),
            found.join(", ")
        ));
    }
    Ok(())
}

/// 1..1 choice: fails unless exactly one alternative is set
pub(crate) fn exactly_one(element: &str, alternatives: &Alternatives<'_>) -> Result<(), String> {
    at_most_one(element, alternatives)?;
    if present(alternatives).is_empty() {
        return Err(format!(
            "{element}[x]: field required, expected one of {}",
            names(alternatives)
        ));
    }
    Ok(())
}
