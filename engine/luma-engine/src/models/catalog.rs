use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlphabetItem {
    pub letter: char,
    pub word: &'static str,
    pub emoji: &'static str,
}

const fn item(letter: char, word: &'static str, emoji: &'static str) -> AlphabetItem {
    AlphabetItem {
        letter,
        word,
        emoji,
    }
}

/// Ordered A to Z
pub static ALPHABET: [AlphabetItem; 26] = [
    item('A', "Apple", "🍎"),
    item('B', "Ball", "⚽"),
    item('C', "Cat", "🐱"),
    item('D', "Dog", "🐶"),
    item('E', "Elephant", "🐘"),
    item('F', "Fish", "🐠"),
    item('G', "Grapes", "🍇"),
    item('H', "House", "🏠"),
    item('I', "Ice cream", "🍦"),
    item('J', "Juice", "🧃"),
    item('K', "Kite", "🪁"),
    item('L', "Lion", "🦁"),
    item('M', "Moon", "🌙"),
    item('N', "Nest", "🪺"),
    item('O', "Orange", "🍊"),
    item('P', "Pizza", "🍕"),
    item('Q', "Queen", "👑"),
    item('R', "Rainbow", "🌈"),
    item('S', "Sun", "☀️"),
    item('T', "Tree", "🌳"),
    item('U', "Umbrella", "☂️"),
    item('V', "Violin", "🎻"),
    item('W', "Whale", "🐋"),
    item('X', "Xylophone", "🎹"),
    item('Y', "Yellow", "💛"),
    item('Z', "Zebra", "🦓"),
];

/// Glyphs the math quiz counts with
pub static MATH_GLYPHS: [&str; 10] = ["🌳", "🍎", "🐝", "🌸", "🐣", "⭐", "🦋", "🐧", "🎈", "🍓"];

impl AlphabetItem {
    /// "C - Cat"
    pub fn pairing(&self) -> String {
        format!("{} - {}", self.letter, self.word)
    }

    /// Phrase read aloud by the "Hear it!" button
    pub fn speech(&self) -> String {
        format!("{} for {}", self.letter, self.word)
    }
}

/// Letters unlocked at `level`: the first `min(6 + 2 * level, 26)` items
pub fn alphabet_pool(level: u32) -> &'static [AlphabetItem] {
    let size = (level as usize)
        .saturating_mul(2)
        .saturating_add(6)
        .min(ALPHABET.len());
    &ALPHABET[..size]
}

pub fn find_letter(letter: char) -> Option<&'static AlphabetItem> {
    let letter = letter.to_ascii_uppercase();
    ALPHABET.iter().find(|item| item.letter == letter)
}
