//! Voice command parsing.
//!
//! Turns a finalized utterance (e.g., "add 2 apples") into a typed [`Command`].
//! Parsing never fails: anything that matches no rule is [`Command::Unknown`].

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A structured command interpreted from one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Add {
        item: String,
        qty: u32,
    },
    Remove {
        item: String,
    },
    Modify {
        item: String,
        qty: u32,
    },
    Search {
        item: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_price: Option<f64>,
    },
    Unknown,
}

impl Command {
    pub fn action(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Remove { .. } => "remove",
            Command::Modify { .. } => "modify",
            Command::Search { .. } => "search",
            Command::Unknown => "unknown",
        }
    }

    /// The item phrase, if this command carries one.
    pub fn item(&self) -> Option<&str> {
        match self {
            Command::Add { item, .. }
            | Command::Remove { item }
            | Command::Modify { item, .. }
            | Command::Search { item, .. } => Some(item),
            Command::Unknown => None,
        }
    }
}

/// Spelled-out quantities. Anything outside this table falls back to 1.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Alternation accepted wherever a quantity token is expected.
const QTY: &str = r"\d+|one|two|three|four|five|six|seven|eight|nine|ten";

type Extractor = fn(&Captures<'_>) -> Command;

/// One entry in the ordered rule table: a matcher and the function that maps
/// its positional captures onto command fields.
struct Rule {
    name: &'static str,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, extract: Extractor) -> Self {
        let pattern = Regex::new(&format!("(?i){}", pattern))
            .unwrap_or_else(|e| panic!("invalid pattern for rule {}: {}", name, e));
        Self {
            name,
            pattern,
            extract,
        }
    }
}

/// Rules in precedence order. The first rule that matches wins.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // 1 = item, 2 = price ceiling
        Rule::new(
            "search",
            r"^(?:find(?:\s+me)?|search|look\s+for)\s+(.+?)(?:\s+under\s+([0-9]+))?$",
            extract_search,
        ),
        // 1 = quantity, 2 = item
        Rule::new(
            "add",
            &format!(
                r"^(?:add|buy|i\s+need|i\s+want\s+to\s+buy|put|include)\s+(?:({})\b)?\s*(.+)$",
                QTY
            ),
            extract_add,
        ),
        // 1 = item
        Rule::new(
            "remove",
            r"^(?:remove|delete|take\s+(?:off|out))\s+(.+)$",
            extract_remove,
        ),
        // 1 = item, 2 = quantity
        Rule::new(
            "modify",
            &format!(r"^(?:change|set|update)\s+(.+?)\s+to\s+({})$", QTY),
            extract_modify,
        ),
        // 1 = quantity, 2 = item (after an optional "<unit> of" clause)
        Rule::new(
            "add_embedded_quantity",
            &format!(r"^(?:add|buy).+?\b({})\s+(?:\w+\s+of\s+)?(.+)$", QTY),
            extract_add,
        ),
    ]
});

/// Parse an utterance into a command.
///
/// Keywords match case-insensitively and runs of whitespace are collapsed
/// before matching. The item phrase keeps the speaker's casing.
pub fn parse(text: &str) -> Command {
    let utterance = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if utterance.is_empty() {
        return Command::Unknown;
    }

    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(&utterance) {
            let command = (rule.extract)(&caps);
            tracing::debug!(rule = rule.name, ?command, "matched command rule");
            return command;
        }
    }

    tracing::debug!(%utterance, "no command rule matched");
    Command::Unknown
}

/// Resolve a quantity token.
///
/// Missing, zero, unparseable or out-of-range tokens all resolve to 1.
pub fn resolve_quantity(token: Option<&str>) -> u32 {
    let Some(token) = token else {
        return 1;
    };

    token
        .parse::<u32>()
        .ok()
        .or_else(|| {
            NUMBER_WORDS
                .iter()
                .find(|(word, _)| word.eq_ignore_ascii_case(token))
                .map(|&(_, n)| n)
        })
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

fn capture<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

fn item_at(caps: &Captures<'_>, index: usize) -> String {
    capture(caps, index).unwrap_or_default().trim().to_string()
}

fn extract_search(caps: &Captures<'_>) -> Command {
    Command::Search {
        item: item_at(caps, 1),
        max_price: capture(caps, 2).and_then(|p| p.parse::<f64>().ok()),
    }
}

fn extract_add(caps: &Captures<'_>) -> Command {
    Command::Add {
        item: item_at(caps, 2),
        qty: resolve_quantity(capture(caps, 1)),
    }
}

fn extract_remove(caps: &Captures<'_>) -> Command {
    Command::Remove {
        item: item_at(caps, 1),
    }
}

fn extract_modify(caps: &Captures<'_>) -> Command {
    Command::Modify {
        item: item_at(caps, 1),
        qty: resolve_quantity(capture(caps, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(item: &str, qty: u32) -> Command {
        Command::Add {
            item: item.to_string(),
            qty,
        }
    }

    fn search(item: &str, max_price: Option<f64>) -> Command {
        Command::Search {
            item: item.to_string(),
            max_price,
        }
    }

    #[test]
    fn test_add_with_digit_quantity() {
        assert_eq!(parse("add 2 apples"), add("apples", 2));
        assert_eq!(parse("buy 12 eggs"), add("eggs", 12));
    }

    #[test]
    fn test_add_with_spelled_quantity() {
        assert_eq!(parse("buy three milk"), add("milk", 3));
        assert_eq!(parse("i want to buy five bananas"), add("bananas", 5));
        assert_eq!(parse("add ten oranges"), add("oranges", 10));
    }

    #[test]
    fn test_add_defaults_quantity() {
        assert_eq!(parse("add milk"), add("milk", 1));
        assert_eq!(parse("i need apples"), add("apples", 1));
        assert_eq!(parse("put bread"), add("bread", 1));
        assert_eq!(parse("include paneer"), add("paneer", 1));
    }

    #[test]
    fn test_add_zero_quantity_becomes_one() {
        assert_eq!(parse("add 0 apples"), add("apples", 1));
    }

    #[test]
    fn test_add_spelled_number_must_be_a_whole_word() {
        assert_eq!(parse("add tenderloin"), add("tenderloin", 1));
        assert_eq!(parse("buy onions"), add("onions", 1));
    }

    #[test]
    fn test_add_pack_size_is_not_a_quantity() {
        assert_eq!(parse("add 500ml milk"), add("500ml milk", 1));
        assert_eq!(parse("add 2 500ml milk"), add("500ml milk", 2));
    }

    #[test]
    fn test_add_preserves_item_casing() {
        assert_eq!(parse("Add 2 Granny Smith Apples"), add("Granny Smith Apples", 2));
        assert_eq!(parse("ADD milk"), add("milk", 1));
    }

    #[test]
    fn test_add_leading_verb_keeps_unit_clause() {
        // The leading-verb rule wins over the embedded-quantity rule.
        assert_eq!(parse("add 2 bottles of water"), add("bottles of water", 2));
    }

    #[test]
    fn test_add_embedded_quantity() {
        assert_eq!(parse("add, 2 bottles of water"), add("water", 2));
        assert_eq!(parse("buying 3 packets of chips"), add("chips", 3));
        assert_eq!(parse("adding four apples"), add("apples", 4));
    }

    #[test]
    fn test_remove() {
        let remove = |item: &str| Command::Remove {
            item: item.to_string(),
        };
        assert_eq!(parse("remove milk"), remove("milk"));
        assert_eq!(parse("delete brown bread"), remove("brown bread"));
        assert_eq!(parse("take off eggs"), remove("eggs"));
        assert_eq!(parse("take out the trash bags"), remove("the trash bags"));
    }

    #[test]
    fn test_modify() {
        let modify = |item: &str, qty: u32| Command::Modify {
            item: item.to_string(),
            qty,
        };
        assert_eq!(parse("change apples to 5"), modify("apples", 5));
        assert_eq!(parse("set apple juice to three"), modify("apple juice", 3));
        assert_eq!(parse("update milk to 0"), modify("milk", 1));
    }

    #[test]
    fn test_modify_requires_quantity() {
        assert_eq!(parse("set apples to many"), Command::Unknown);
    }

    #[test]
    fn test_search_with_price_ceiling() {
        assert_eq!(
            parse("find toothpaste under 5"),
            search("toothpaste", Some(5.0))
        );
        assert_eq!(
            parse("look for orange juice under 3"),
            search("orange juice", Some(3.0))
        );
    }

    #[test]
    fn test_search_without_price_ceiling() {
        assert_eq!(parse("find apples"), search("apples", None));
        assert_eq!(parse("find me brown bread"), search("brown bread", None));
        assert_eq!(parse("search soap"), search("soap", None));
        assert_eq!(parse("find meat"), search("meat", None));
    }

    #[test]
    fn test_search_wins_over_add() {
        assert_eq!(parse("find add ons"), search("add ons", None));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(parse("   add    2\t apples  "), add("apples", 2));
        assert_eq!(
            parse("find  toothpaste   under  5"),
            search("toothpaste", Some(5.0))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse("xyz not a command"), Command::Unknown);
        assert_eq!(parse(""), Command::Unknown);
        assert_eq!(parse("   "), Command::Unknown);
        assert_eq!(parse("add"), Command::Unknown);
    }

    #[test]
    fn test_resolve_quantity() {
        assert_eq!(resolve_quantity(None), 1);
        assert_eq!(resolve_quantity(Some("7")), 7);
        assert_eq!(resolve_quantity(Some("Nine")), 9);
        assert_eq!(resolve_quantity(Some("dozen")), 1);
        assert_eq!(resolve_quantity(Some("99999999999999")), 1);
    }

    #[test]
    fn test_command_serializes_with_action_tag() {
        let json = serde_json::to_value(parse("find soap")).unwrap();
        assert_eq!(json, serde_json::json!({"action": "search", "item": "soap"}));

        let json = serde_json::to_value(Command::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({"action": "unknown"}));
    }
}
