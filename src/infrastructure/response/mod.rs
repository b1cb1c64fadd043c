use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static TRAILING_SPACES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip model scratchpad blocks and tidy whitespace in an assistant reply.
pub fn clean_reply(reply: &str) -> String {
    let cleaned = THINK_TAG_PATTERN.replace_all(reply, "");
    let cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "");
    let cleaned = TRAILING_SPACES_PATTERN.replace_all(&cleaned, "\n");
    let cleaned = MULTIPLE_NEWLINES_PATTERN.replace_all(cleaned.trim(), "\n\n");

    cleaned.into_owned()
}
