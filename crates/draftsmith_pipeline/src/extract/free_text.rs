//! Last-resort grammar for post drafts written as prose.
//!
//! The grammar is an ordered list of [`Rule`]s. Each rule rewrites the list of
//! segments produced so far; the final segments are trimmed, filtered by length
//! and capped. When a prompt changes the way models format their replies, add or
//! adjust a rule here and cover it with a test.

use regex::Regex;
use std::sync::LazyLock;

static INTRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:sure|certainly|absolutely|of course|okay|ok|great)\b[!,.]*\s*)?(?:here(?:'s| is| are)|below (?:is|are)|these are|i(?:'ve| have) (?:created|written|drafted|prepared))\b",
    )
    .expect("valid intro regex")
});

static BARE_ACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:sure|certainly|absolutely|of course|okay|ok)[!,.]*$").expect("valid ack regex")
});

static OUTRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:let me know|feel free|i hope|hope (?:this|these)|would you like|happy to)\b")
        .expect("valid outro regex")
});

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*[*_#]*[ \t]*(?:post|variation|option|version|draft)[ \t]*#?[ \t]*\d+(?:[ \t]*\([^)\n]*\))?[ \t]*[*_]*[ \t]*[:.)\-–—]?[ \t]*[*_]*[ \t]*",
    )
    .expect("valid header regex")
});

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[*_]*[ \t]*\d+[.)][ \t]*[*_]*[ \t]*").expect("valid numbered item regex")
});

static LEAD_IN_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:posts?|drafts?|variations?|versions?)\b").expect("valid lead-in subject regex")
});

static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").expect("valid rule regex")
});

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("valid blank line regex"));

/// A run of text and whether a post header already delimited it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    delimited: bool,
}

/// One named step of the free-text grammar.
#[derive(Clone, Copy)]
struct Rule {
    name: &'static str,
    apply: fn(Vec<Segment>) -> Vec<Segment>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The rules in the order they run.
const RULES: [Rule; 7] = [
    // "\r\n" and lone "\r" become "\n" so the line-based rules see one convention.
    Rule {
        name: "normalize-line-endings",
        apply: normalize_line_endings,
    },
    // Leading chatter such as "Sure! Here are 4 variations:" is not a post.
    Rule {
        name: "strip-intro",
        apply: strip_intro,
    },
    // Trailing offers such as "Let me know if you'd like changes." are not a post.
    Rule {
        name: "strip-outro",
        apply: strip_outro,
    },
    // Markdown rules ("---") separate posts like a blank line does.
    Rule {
        name: "rules-to-blank-lines",
        apply: rules_to_blank_lines,
    },
    // "Post 1:", "**Variation 2 (Story)**" start a new post; text before the first header is chatter.
    Rule {
        name: "split-on-headers",
        apply: split_on_headers,
    },
    // "1.", "2)" start a new post, unless a header already delimited the segment.
    Rule {
        name: "split-on-numbered-items",
        apply: split_on_numbered_items,
    },
    // Without markers, posts are the paragraphs between blank lines.
    Rule {
        name: "split-on-blank-lines",
        apply: split_on_blank_lines,
    },
];

/// Ordered strip/split rules plus the length filter and cap.
///
/// # Examples
///
/// ```
/// use draftsmith_pipeline::FreeTextGrammar;
///
/// let grammar = FreeTextGrammar::new(20, 4);
/// let raw = "Here are two drafts:\n\nPost 1: Rust makes systems programming approachable.\n\nPost 2: Fearless concurrency is not just a slogan.";
/// assert_eq!(
///     grammar.extract(raw),
///     vec![
///         "Rust makes systems programming approachable.",
///         "Fearless concurrency is not just a slogan.",
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FreeTextGrammar {
    min_chars: usize,
    max_posts: usize,
}

impl FreeTextGrammar {
    /// Keep entries longer than `min_chars`, at most `max_posts` of them.
    pub fn new(min_chars: usize, max_posts: usize) -> Self {
        Self { min_chars, max_posts }
    }

    /// Names of the rules, in order.
    pub fn rules() -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|rule| rule.name)
    }

    /// Apply every rule, then trim, filter and cap.
    pub fn extract(&self, raw: &str) -> Vec<String> {
        let mut segments = vec![Segment {
            text: raw.to_string(),
            delimited: false,
        }];
        for rule in RULES.iter() {
            segments = (rule.apply)(segments);
            tracing::trace!(rule = rule.name, segments = segments.len(), "Applied free-text rule");
        }

        segments
            .into_iter()
            .map(|segment| strip_wrapping_quotes(segment.text.trim()).to_string())
            .filter(|text| super::is_substantial(text, self.min_chars))
            .take(self.max_posts)
            .collect()
    }
}

fn normalize_line_endings(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|segment| Segment {
            text: segment.text.replace("\r\n", "\n").replace('\r', "\n"),
            ..segment
        })
        .collect()
}

fn strip_intro(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|segment| {
            let mut text = segment.text.trim_start();
            loop {
                let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
                let line = first.trim();
                if line.is_empty() && !rest.is_empty() {
                    text = rest.trim_start();
                    continue;
                }
                if (INTRO.is_match(line) && line.ends_with(':')) || BARE_ACK.is_match(line) {
                    text = rest.trim_start();
                    continue;
                }
                // "Here are four post variations for finance leaders." ends in a period.
                if INTRO.is_match(line) {
                    if let Some(blank) = BLANK_LINES.find(text) {
                        if LEAD_IN_SUBJECT.is_match(&text[..blank.start()]) {
                            text = text[blank.end()..].trim_start();
                            continue;
                        }
                    }
                }
                break;
            }
            Segment {
                text: text.to_string(),
                ..segment
            }
        })
        .collect()
}

fn strip_outro(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|segment| {
            let mut text = segment.text.trim_end();
            while let Some((rest, last)) = text.rsplit_once('\n') {
                if OUTRO.is_match(last.trim()) {
                    text = rest.trim_end();
                } else {
                    break;
                }
            }
            Segment {
                text: text.to_string(),
                ..segment
            }
        })
        .collect()
}

fn rules_to_blank_lines(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|segment| Segment {
            text: HORIZONTAL_RULE.replace_all(&segment.text, "").into_owned(),
            ..segment
        })
        .collect()
}

fn split_on_headers(segments: Vec<Segment>) -> Vec<Segment> {
    split_on(&HEADER, segments)
}

fn split_on_numbered_items(segments: Vec<Segment>) -> Vec<Segment> {
    split_on(&NUMBERED_ITEM, segments)
}

/// Cut undelimited segments at every `marker`, dropping the text before the first one.
fn split_on(marker: &Regex, segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .flat_map(|segment| {
            if segment.delimited {
                return vec![segment];
            }
            let starts: Vec<(usize, usize)> = marker
                .find_iter(&segment.text)
                .map(|m| (m.start(), m.end()))
                .collect();
            if starts.is_empty() {
                return vec![segment];
            }
            starts
                .iter()
                .enumerate()
                .map(|(i, &(_, body_start))| {
                    let body_end = starts.get(i + 1).map_or(segment.text.len(), |&(next, _)| next);
                    Segment {
                        text: segment.text[body_start..body_end].to_string(),
                        delimited: true,
                    }
                })
                .collect()
        })
        .collect()
}

fn split_on_blank_lines(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .flat_map(|segment| {
            if segment.delimited {
                return vec![segment];
            }
            BLANK_LINES
                .split(&segment.text)
                .map(|piece| Segment {
                    text: piece.to_string(),
                    delimited: false,
                })
                .collect()
        })
        .collect()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    for (open, close) in [('"', '"'), ('“', '”')] {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            return inner.trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "Artificial intelligence is changing how finance teams close their books.";
    const B: &str = "Three lessons from shipping an AI assistant to ten thousand accountants.";
    const C: &str = "Your data strategy is your AI strategy. Here is why that matters in 2026.";

    fn grammar() -> FreeTextGrammar {
        FreeTextGrammar::new(50, 4)
    }

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<_> = FreeTextGrammar::rules().collect();
        assert_eq!(
            names,
            vec![
                "normalize-line-endings",
                "strip-intro",
                "strip-outro",
                "rules-to-blank-lines",
                "split-on-headers",
                "split-on-numbered-items",
                "split-on-blank-lines",
            ]
        );
    }

    #[test]
    fn test_numbered_posts_separated_by_blank_lines() {
        let raw = format!("Sure! Here are 3 LinkedIn posts:\n\n1. {A}\n\n2. {B}\n\n3. {C}\n\nLet me know if you'd like any changes!");
        assert_eq!(grammar().extract(&raw), vec![A, B, C]);
    }

    #[test]
    fn test_variation_markers_keep_multi_paragraph_posts_whole() {
        let raw = format!(
            "**Variation 1:**\n{A}\n\nWhat do you think?\n\n**Variation 2 (Story):**\n{B}\r\n"
        );
        let posts = grammar().extract(&raw);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], format!("{A}\n\nWhat do you think?"));
        assert_eq!(posts[1], B);
    }

    #[test]
    fn test_plain_paragraphs_and_rules() {
        let raw = format!("{A}\n\n---\n\n\"{B}\"\n\nToo short.");
        assert_eq!(grammar().extract(&raw), vec![A, B]);
    }

    #[test]
    fn test_cap_at_max_posts() {
        let raw = [A, B, C, A, B].join("\n\n");
        assert_eq!(grammar().extract(&raw).len(), 4);
    }

    #[test]
    fn test_intro_only_stripped_when_it_is_a_lead_in() {
        // A post that happens to start with "Here is" but is not a lead-in line.
        let post = "Here is the truth about AI in finance: it is a data problem first and a model problem second.";
        assert_eq!(grammar().extract(post), vec![post]);
    }

    #[test]
    fn test_numbered_list_inside_post_header_stays_in_post() {
        let raw = format!(
            "Post 1: {A}\nThree things we learned along the way:\n1. Data quality beats model size every time.\n2. Put humans in the loop before you automate.\n\nPost 2: {B}"
        );
        let posts = grammar().extract(&raw);
        assert_eq!(posts.len(), 2);
        assert!(posts[0].starts_with(A));
        assert!(posts[0].contains("1. Data quality beats model size"));
        assert!(posts[0].ends_with("2. Put humans in the loop before you automate."));
        assert_eq!(posts[1], B);
    }

    #[test]
    fn test_period_terminated_lead_in_is_stripped() {
        let raw = format!("Here are four LinkedIn post variations tailored for finance leaders.\n\n{A}\n\n{B}");
        assert_eq!(grammar().extract(&raw), vec![A, B]);
    }

    #[test]
    fn test_exclaimed_lead_in_is_stripped() {
        let raw = format!("Sure! I've drafted two posts for you!\n\n{A}\n\n{B}");
        assert_eq!(grammar().extract(&raw), vec![A, B]);
    }
}
