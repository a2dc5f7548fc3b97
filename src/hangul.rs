/// Precomposed Hangul syllables occupy U+AC00..=U+D7A3 and are laid out as
/// `BASE + (lead * 21 + vowel) * 28 + tail`.
const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const VOWEL_COUNT: u32 = 21;
const TAIL_COUNT: u32 = 28;

// Compatibility jamo, i.e. the letters produced by a Korean keyboard layout.
const LEADS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ',
    'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ',
    'ㅣ',
];

// Index 0 of the tail slot means "no trailing consonant".
const TAILS: [Option<char>; 28] = [
    None, Some('ㄱ'), Some('ㄲ'), Some('ㄳ'), Some('ㄴ'), Some('ㄵ'), Some('ㄶ'),
    Some('ㄷ'), Some('ㄹ'), Some('ㄺ'), Some('ㄻ'), Some('ㄼ'), Some('ㄽ'), Some('ㄾ'),
    Some('ㄿ'), Some('ㅀ'), Some('ㅁ'), Some('ㅂ'), Some('ㅄ'), Some('ㅅ'), Some('ㅆ'),
    Some('ㅇ'), Some('ㅈ'), Some('ㅊ'), Some('ㅋ'), Some('ㅌ'), Some('ㅍ'), Some('ㅎ'),
];

/// The parts of one composed syllable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub lead: char,
    pub vowel: char,
    pub tail: Option<char>,
}

pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

pub fn decompose_syllable(c: char) -> Option<Syllable> {
    if !is_syllable(c) {
        return None;
    }

    let index = c as u32 - SYLLABLE_BASE;
    let lead = index / (VOWEL_COUNT * TAIL_COUNT);
    let vowel = (index % (VOWEL_COUNT * TAIL_COUNT)) / TAIL_COUNT;
    let tail = index % TAIL_COUNT;

    Some(Syllable {
        lead: LEADS[lead as usize],
        vowel: VOWELS[vowel as usize],
        tail: TAILS[tail as usize],
    })
}

/// Splits every syllable block of `text` into its jamo. Everything else,
/// standalone jamo included, is kept as a single token.
///
/// ```
/// use kiso_blog::hangul::decompose;
///
/// assert_eq!(decompose("한 a"), vec!['ㅎ', 'ㅏ', 'ㄴ', ' ', 'a']);
/// ```
pub fn decompose(text: &str) -> Vec<char> {
    let mut tokens = Vec::with_capacity(text.len());
    for c in text.chars() {
        match decompose_syllable(c) {
            Some(syllable) => {
                tokens.push(syllable.lead);
                tokens.push(syllable.vowel);
                if let Some(tail) = syllable.tail {
                    tokens.push(tail);
                }
            }
            None => tokens.push(c),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_with_tail() {
        assert_eq!(decompose("한"), vec!['ㅎ', 'ㅏ', 'ㄴ']);
        assert_eq!(decompose("닭"), vec!['ㄷ', 'ㅏ', 'ㄺ']);
    }

    #[test]
    fn test_decompose_without_tail() {
        assert_eq!(decompose("사"), vec!['ㅅ', 'ㅏ']);
        assert_eq!(decompose("가"), vec!['ㄱ', 'ㅏ']);
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(decompose("\u{AC00}"), vec!['ㄱ', 'ㅏ']);
        assert_eq!(decompose("\u{D7A3}"), vec!['ㅎ', 'ㅣ', 'ㅎ']);
        assert!(!is_syllable('\u{ABFF}'));
        assert!(!is_syllable('\u{D7A4}'));
    }

    #[test]
    fn test_ascii_is_identity() {
        let text = "Rust 2024, hello-world!";
        let expected: Vec<char> = text.chars().collect();
        assert_eq!(decompose(text), expected);
    }

    #[test]
    fn test_standalone_jamo_pass_through() {
        assert_eq!(decompose("ㅈㅓ"), vec!['ㅈ', 'ㅓ']);
        // Conjoining jamo are left alone as well
        assert_eq!(decompose("\u{1112}\u{1161}"), vec!['\u{1112}', '\u{1161}']);
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(
            decompose("개발 dev 日本"),
            vec!['ㄱ', 'ㅐ', 'ㅂ', 'ㅏ', 'ㄹ', ' ', 'd', 'e', 'v', ' ', '日', '本']
        );
        assert_eq!(decompose(""), Vec::<char>::new());
    }

    #[test]
    fn test_decompose_syllable() {
        assert_eq!(decompose_syllable('괜'), Some(Syllable { lead: 'ㄱ', vowel: 'ㅙ', tail: Some('ㄴ') }));
        assert_eq!(decompose_syllable('a'), None);
        assert_eq!(decompose_syllable('ㄱ'), None);
    }
}
