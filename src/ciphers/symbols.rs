//! Table-driven symbol ciphers: Morse, Braille, grid (pigpen-style) and emoji.
//!
//! Encoding is total. A character with no table entry becomes `?`, except in
//! the emoji cipher which passes it through unchanged.

use std::collections::HashMap;
use std::sync::OnceLock;

const UNKNOWN: char = '?';

const MORSE: [(char, &str); 54] = [
    ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."), ('E', "."), ('F', "..-."),
    ('G', "--."), ('H', "...."), ('I', ".."), ('J', ".---"), ('K', "-.-"), ('L', ".-.."),
    ('M', "--"), ('N', "-."), ('O', "---"), ('P', ".--."), ('Q', "--.-"), ('R', ".-."),
    ('S', "..."), ('T', "-"), ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"),
    ('Y', "-.--"), ('Z', "--.."),
    ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"), ('4', "....-"),
    ('5', "....."), ('6', "-...."), ('7', "--..."), ('8', "---.."), ('9', "----."),
    ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."), ('\'', ".----."), ('!', "-.-.--"),
    ('/', "-..-."), ('(', "-.--."), (')', "-.--.-"), ('&', ".-..."), (':', "---..."),
    (';', "-.-.-."), ('=', "-...-"), ('+', ".-.-."), ('-', "-....-"), ('_', "..--.-"),
    ('"', ".-..-."), ('$', "...-..-"), ('@', ".--.-."),
];

const MORSE_LETTER_GAP: &str = " ";
const MORSE_WORD_GAP: &str = "   ";

const BRAILLE_NUMBER_PREFIX: char = '⠼';

const BRAILLE_LETTERS: [(char, &str); 26] = [
    ('A', "⠁"), ('B', "⠃"), ('C', "⠉"), ('D', "⠙"), ('E', "⠑"), ('F', "⠋"), ('G', "⠛"),
    ('H', "⠓"), ('I', "⠊"), ('J', "⠚"), ('K', "⠅"), ('L', "⠇"), ('M', "⠍"), ('N', "⠝"),
    ('O', "⠕"), ('P', "⠏"), ('Q', "⠟"), ('R', "⠗"), ('S', "⠎"), ('T', "⠞"), ('U', "⠥"),
    ('V', "⠧"), ('W', "⠺"), ('X', "⠭"), ('Y', "⠽"), ('Z', "⠵"),
];

/// Digits reuse the cells of `a` through `j` after the number prefix.
const BRAILLE_DIGITS: [(char, char); 10] = [
    ('1', '⠁'), ('2', '⠃'), ('3', '⠉'), ('4', '⠙'), ('5', '⠑'),
    ('6', '⠋'), ('7', '⠛'), ('8', '⠓'), ('9', '⠊'), ('0', '⠚'),
];

const BRAILLE_SYMBOLS: [(char, &str); 24] = [
    ('.', "⠲"), (',', "⠂"), ('?', "⠦"), ('!', "⠖"), (':', "⠱"), (';', "⠰"),
    ('\'', "⠄"), ('"', "⠶"), ('(', "⠐⠣"), (')', "⠐⠜"), ('-', "⠤"), ('/', "⠌"),
    ('&', "⠯"), ('+', "⠬"), ('=', "⠿"), ('%', "⠨⠴"), ('@', "⠈⠁"), ('*', "⠔"),
    ('_', "⠸⠤"), ('#', "⠼⠶"), ('$', "⠈⠎"), (' ', " "), ('\n', "\n"), ('\t', "\t"),
];

const GRID_LETTERS: [(char, &str); 26] = [
    ('A', "⊔"), ('B', "⊓"), ('C', "⊏"), ('D', "⊐"), ('E', "⊑"), ('F', "⊒"), ('G', "⊔⊓"),
    ('H', "⊏⊐"), ('I', "⊑⊒"), ('J', "⊔⊏"), ('K', "⊓⊐"), ('L', "⊏⊑"), ('M', "⊐⊒"),
    ('N', "⊔⊑"), ('O', "⊓⊏"), ('P', "⊏⊓"), ('Q', "⊐⊔"), ('R', "⊑⊏"), ('S', "⊒⊓"),
    ('T', "⊔⊒"), ('U', "⊓⊑"), ('V', "⊏⊒"), ('W', "⊐⊑"), ('X', "⊑⊔"), ('Y', "⊒⊏"),
    ('Z', "⊔⊓⊏"),
];

/// Grid symbols are joined with a zero-width space so multi-glyph letters stay apart.
const GRID_SEPARATOR: char = '\u{200B}';

const EMOJI_LETTERS: [(char, char); 26] = [
    ('A', '😀'), ('B', '😃'), ('C', '😄'), ('D', '😁'), ('E', '😆'), ('F', '😅'), ('G', '😂'),
    ('H', '🤣'), ('I', '😊'), ('J', '😇'), ('K', '🙂'), ('L', '🙃'), ('M', '😉'), ('N', '😌'),
    ('O', '😍'), ('P', '🥰'), ('Q', '😘'), ('R', '😗'), ('S', '😙'), ('T', '😚'), ('U', '😋'),
    ('V', '😛'), ('W', '😜'), ('X', '🤪'), ('Y', '😝'), ('Z', '🤑'),
];

const EMOJI_BANG: char = '❗';
const KEYCAP_SUFFIX: &str = "\u{FE0F}\u{20E3}";

fn is_grid_passthrough(c: char) -> bool {
    c == ' ' || ('1'..='9').contains(&c) || (c.is_ascii_punctuation() && c != '`')
}

struct Tables {
    morse_decode: HashMap<&'static str, char>,
    braille_encode: HashMap<char, &'static str>,
    braille_decode: HashMap<&'static str, char>,
    braille_digit_decode: HashMap<char, char>,
    grid_decode: HashMap<&'static str, char>,
    emoji_decode: HashMap<char, char>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut braille_encode: HashMap<char, &'static str> = HashMap::new();
        let mut braille_decode = HashMap::new();
        for (c, cells) in BRAILLE_LETTERS.iter().chain(BRAILLE_SYMBOLS.iter()) {
            braille_encode.insert(*c, *cells);
            braille_decode.insert(*cells, *c);
        }

        Tables {
            morse_decode: MORSE.iter().map(|(c, code)| (*code, *c)).collect(),
            braille_encode,
            braille_decode,
            braille_digit_decode: BRAILLE_DIGITS.iter().map(|(d, cell)| (*cell, *d)).collect(),
            grid_decode: GRID_LETTERS.iter().map(|(c, glyphs)| (*glyphs, *c)).collect(),
            emoji_decode: EMOJI_LETTERS.iter().map(|(c, e)| (*e, *c)).collect(),
        }
    })
}

fn morse_code(c: char) -> Option<&'static str> {
    MORSE.iter().find(|(k, _)| *k == c).map(|(_, code)| *code)
}

/// Letters are separated by one space, words by three.
pub fn text_to_morse(text: &str) -> String {
    text.to_uppercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| morse_code(c).unwrap_or("?"))
                .collect::<Vec<_>>()
                .join(MORSE_LETTER_GAP)
        })
        .collect::<Vec<_>>()
        .join(MORSE_WORD_GAP)
}

/// Reverse of [`text_to_morse`]. A lone `/` is also read as a word break.
pub fn morse_to_text(morse: &str) -> String {
    let table = &tables().morse_decode;
    morse
        .trim()
        .split(MORSE_WORD_GAP)
        .flat_map(|word| word.split(" / "))
        .map(|word| {
            word.split_whitespace()
                .filter(|code| *code != "/")
                .map(|code| table.get(code).copied().unwrap_or(UNKNOWN))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uncontracted Braille. A run of digits is introduced by one number sign.
pub fn text_to_braille(text: &str) -> String {
    let table = &tables().braille_encode;
    let mut result = String::new();
    let mut in_number = false;

    for c in text.chars() {
        if let Some((_, cell)) = BRAILLE_DIGITS.iter().find(|(d, _)| *d == c) {
            if !in_number {
                result.push(BRAILLE_NUMBER_PREFIX);
                in_number = true;
            }
            result.push(*cell);
            continue;
        }
        in_number = false;
        match table.get(&c.to_ascii_uppercase()) {
            Some(cells) => result.push_str(cells),
            None => result.push(UNKNOWN),
        }
    }
    result
}

/// Reverse of [`text_to_braille`]. Letters come back uppercase.
pub fn braille_to_text(braille: &str) -> String {
    let t = tables();
    let chars: Vec<char> = braille.chars().collect();
    let mut result = String::new();
    let mut in_number = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_number {
            if let Some(digit) = t.braille_digit_decode.get(&c) {
                result.push(*digit);
                i += 1;
                continue;
            }
            in_number = false;
        }

        // Two-cell symbols first, then single cells
        if i + 1 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if let Some(symbol) = t.braille_decode.get(pair.as_str()) {
                result.push(*symbol);
                i += 2;
                continue;
            }
        }

        if c == BRAILLE_NUMBER_PREFIX {
            in_number = true;
            i += 1;
            continue;
        }

        let single = c.to_string();
        result.push(t.braille_decode.get(single.as_str()).copied().unwrap_or(UNKNOWN));
        i += 1;
    }
    result
}

pub fn text_to_grid(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|c| {
            if let Some((_, glyphs)) = GRID_LETTERS.iter().find(|(k, _)| *k == c) {
                (*glyphs).to_string()
            } else if is_grid_passthrough(c) {
                c.to_string()
            } else {
                UNKNOWN.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(GRID_SEPARATOR.to_string().as_str())
}

pub fn grid_to_text(grid: &str) -> String {
    if grid.is_empty() {
        return String::new();
    }
    let table = &tables().grid_decode;
    grid.split(GRID_SEPARATOR)
        .map(|symbol| {
            if let Some(c) = table.get(symbol) {
                return *c;
            }
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if is_grid_passthrough(c) => c,
                _ => UNKNOWN,
            }
        })
        .collect()
}

pub fn text_to_emoji(text: &str) -> String {
    let mut result = String::new();
    for c in text.to_uppercase().chars() {
        if let Some((_, emoji)) = EMOJI_LETTERS.iter().find(|(k, _)| *k == c) {
            result.push(*emoji);
        } else if c.is_ascii_digit() {
            result.push(c);
            result.push_str(KEYCAP_SUFFIX);
        } else if c == '!' {
            result.push(EMOJI_BANG);
        } else {
            result.push(c);
        }
    }
    result
}

/// Reverse of [`text_to_emoji`]; anything that is not a cipher emoji passes through.
pub fn emoji_to_text(emoji: &str) -> String {
    let table = &tables().emoji_decode;
    let mut result = String::new();
    let mut rest = emoji;

    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        if c.is_ascii_digit() {
            if let Some(stripped) = rest.strip_prefix(KEYCAP_SUFFIX) {
                rest = stripped;
            }
            result.push(c);
        } else if c == EMOJI_BANG {
            result.push('!');
        } else {
            result.push(table.get(&c).copied().unwrap_or(c));
        }
    }
    result
}
