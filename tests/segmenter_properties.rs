// Behavioural tests for the segmenter against documented examples and a regex reference splitter
// WHY: the tokenizer replaces regex splitting, so a regex-based reference keeps it honest

use guide_reader::segmenter::{is_space, segment, BoundaryRules, Segmenter, DEFAULT_MARKERS};
use regex_automata::meta::Regex;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{CHANGCHENG_EXPECTED, CHANGCHENG_TEXT, GUGONG_EXPECTED, GUGONG_TEXT};

const PRIVATE_DOT: char = '\u{E000}';

/// Regex rendition of the segmentation pipeline, used only as a test reference
///
/// Inputs must not contain U+E000, which stands in for protected periods.
fn reference_segment(text: &str) -> Vec<String> {
    let clean = text.replace("\r\n", "\n").replace('\r', "\n");

    let chars: Vec<char> = clean.chars().collect();
    let protected: String = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let is_decimal = c == '.'
                && i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit();
            if is_decimal { PRIVATE_DOT } else { c }
        })
        .collect();

    let separator = Regex::new(r"[。！？.!?…—]+[\s\x{FEFF}]*|\n[\s\x{FEFF}]*").expect("separator pattern compiles");
    let whitespace = Regex::new(r"[\s\x{FEFF}]+").expect("whitespace pattern compiles");

    let mut sentences: Vec<String> = Vec::new();
    let mut last = 0;
    for m in separator.find_iter(&protected) {
        let content = &protected[last..m.start()];
        if !content.is_empty() {
            sentences.push(content.to_string());
        }
        if let Some(previous) = sentences.last_mut() {
            previous.push_str(&protected[m.start()..m.end()]);
        }
        last = m.end();
    }
    if last < protected.len() {
        sentences.push(protected[last..].to_string());
    }

    sentences
        .into_iter()
        .map(|s| {
            let restored = s.replace(PRIVATE_DOT, ".");
            let mut collapsed = String::new();
            let mut cursor = 0;
            for m in whitespace.find_iter(&restored) {
                collapsed.push_str(&restored[cursor..m.start()]);
                collapsed.push(' ');
                cursor = m.end();
            }
            collapsed.push_str(&restored[cursor..]);
            collapsed.trim_matches(is_space).to_string()
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Deterministic pseudo-random documents over an alphabet rich in boundary cases
fn generated_documents(count: usize) -> Vec<String> {
    const ALPHABET: [char; 21] = [
        'a', 'B', '中', '文', '1', '2', '9', '.', '.', '。', '！', '？', '!', '?', '…', '—', ' ', '\n', '\r', '\u{3000}',
        '\u{FEFF}',
    ];
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    (0..count)
        .map(|_| {
            let len = next() % 48;
            (0..len).map(|_| ALPHABET[next() % ALPHABET.len()]).collect()
        })
        .collect()
}

fn strip_markers_and_whitespace(text: &str) -> String {
    text.chars()
        .filter(|c| !is_space(*c) && !DEFAULT_MARKERS.contains(c))
        .collect()
}

#[test]
fn test_documented_examples() {
    assert!(segment("").is_empty());
    assert!(segment("   ").is_empty());
    assert_eq!(segment("Hello. World."), vec!["Hello.", "World."]);
    assert_eq!(segment("温度是3.14度。今天天气好。"), vec!["温度是3.14度。", "今天天气好。"]);
    assert_eq!(segment("No terminal punctuation"), vec!["No terminal punctuation"]);
    assert_eq!(segment("Line one\nLine two"), vec!["Line one", "Line two"]);
    assert_eq!(segment("Wow!!! Really?"), vec!["Wow!!!", "Really?"]);
}

#[test]
fn test_byte_order_mark_prefixed_guide() {
    assert!(segment("\u{FEFF}").is_empty());
    let with_bom = format!("\u{FEFF}{GUGONG_TEXT}");
    assert_eq!(segment(&with_bom), GUGONG_EXPECTED);
}

#[test]
fn test_decimal_chain_rules() {
    assert_eq!(segment("1.2.3"), vec!["1.2.3"]);
    assert!(segment("....").is_empty());
    assert_eq!(segment("3...4"), vec!["3...", "4"]);
    assert_eq!(segment("版本2024.5发布。"), vec!["版本2024.5发布。"]);
}

#[test]
fn test_guide_documents() {
    assert_eq!(segment(GUGONG_TEXT), GUGONG_EXPECTED);
    assert_eq!(segment(CHANGCHENG_TEXT), CHANGCHENG_EXPECTED);
}

#[test]
fn test_matches_regex_reference_on_guides() {
    for text in [GUGONG_TEXT, CHANGCHENG_TEXT, "  。abc", "a\n. b", "x.\r\n\r\ny"] {
        assert_eq!(segment(text), reference_segment(text), "input: {text:?}");
    }
}

#[test]
fn test_matches_regex_reference_on_generated_documents() {
    for text in generated_documents(2000) {
        assert_eq!(segment(&text), reference_segment(&text), "input: {text:?}");
    }
}

#[test]
fn test_output_whitespace_is_normalized() {
    for text in generated_documents(500) {
        for sentence in segment(&text) {
            assert!(!sentence.is_empty(), "empty sentence from {text:?}");
            assert_eq!(sentence.trim_matches(is_space), sentence, "untrimmed sentence from {text:?}");
            let chars: Vec<char> = sentence.chars().collect();
            assert!(
                !chars.windows(2).any(|w| is_space(w[0]) && is_space(w[1])),
                "whitespace run in {sentence:?} from {text:?}"
            );
            assert!(!sentence.contains(['\n', '\r', '\t', '\u{FEFF}']), "unnormalized whitespace in {sentence:?}");
        }
    }
}

#[test]
fn test_content_is_preserved_in_order() {
    for text in generated_documents(500).iter().map(String::as_str).chain([GUGONG_TEXT, CHANGCHENG_TEXT]) {
        let joined: String = segment(text).concat();
        assert_eq!(
            strip_markers_and_whitespace(&joined),
            strip_markers_and_whitespace(text),
            "content changed for {text:?}"
        );
    }
}

#[test]
fn test_separator_only_documents_are_empty() {
    for text in ["。", "！？", "……——", "?!.", "\n\n", " \r\n 。 \n !"] {
        assert!(segment(text).is_empty(), "input: {text:?}");
    }
}

#[test]
fn test_segmenter_is_shareable_across_threads() {
    let segmenter = std::sync::Arc::new(Segmenter::new(BoundaryRules::default()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let segmenter = segmenter.clone();
            std::thread::spawn(move || segmenter.segment(GUGONG_TEXT))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), GUGONG_EXPECTED);
    }
}

#[test]
fn test_long_document_scales() {
    let text = "这是一个测试句子，包含数字3.14和English words! ".repeat(5000);
    let sentences = segment(&text);
    assert_eq!(sentences.len(), 5000);
    assert!(sentences.iter().all(|s| s == "这是一个测试句子，包含数字3.14和English words!"));
}
