//! Legacy "Symbol" font remapping.
//!
//! Old HTML editors rendered Greek letters and math glyphs by switching to the
//! Symbol font and typing ordinary Latin-1 characters (`<font face="Symbol">p</font>`
//! draws a π). Text captured from such a section is remapped through this
//! table to the character that was actually displayed.

use std::collections::HashMap;
use std::sync::LazyLock;

static SYMBOL_FONT: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    HashMap::from([
        // Greek alphabet
        ('A', '\u{0391}'), // Α
        ('B', '\u{0392}'), // Β
        ('G', '\u{0393}'), // Γ
        ('D', '\u{0394}'), // Δ
        ('E', '\u{0395}'), // Ε
        ('Z', '\u{0396}'), // Ζ
        ('H', '\u{0397}'), // Η
        ('Q', '\u{0398}'), // Θ
        ('I', '\u{0399}'), // Ι
        ('K', '\u{039A}'), // Κ
        ('L', '\u{039B}'), // Λ
        ('M', '\u{039C}'), // Μ
        ('N', '\u{039D}'), // Ν
        ('X', '\u{039E}'), // Ξ
        ('O', '\u{039F}'), // Ο
        ('P', '\u{03A0}'), // Π
        ('R', '\u{03A1}'), // Ρ
        ('S', '\u{03A3}'), // Σ
        ('T', '\u{03A4}'), // Τ
        ('U', '\u{03A5}'), // Υ
        ('F', '\u{03A6}'), // Φ
        ('C', '\u{03A7}'), // Χ
        ('Y', '\u{03A8}'), // Ψ
        ('W', '\u{03A9}'), // Ω
        ('a', '\u{03B1}'), // α
        ('b', '\u{03B2}'), // β
        ('g', '\u{03B3}'), // γ
        ('d', '\u{03B4}'), // δ
        ('e', '\u{03B5}'), // ε
        ('z', '\u{03B6}'), // ζ
        ('h', '\u{03B7}'), // η
        ('q', '\u{03B8}'), // θ
        ('i', '\u{03B9}'), // ι
        ('k', '\u{03BA}'), // κ
        ('l', '\u{03BB}'), // λ
        ('m', '\u{03BC}'), // μ
        ('n', '\u{03BD}'), // ν
        ('x', '\u{03BE}'), // ξ
        ('o', '\u{03BF}'), // ο
        ('p', '\u{03C0}'), // π
        ('r', '\u{03C1}'), // ρ
        ('V', '\u{03C2}'), // ς
        ('s', '\u{03C3}'), // σ
        ('t', '\u{03C4}'), // τ
        ('u', '\u{03C5}'), // υ
        ('f', '\u{03C6}'), // φ
        ('c', '\u{03C7}'), // χ
        ('y', '\u{03C8}'), // ψ
        ('w', '\u{03C9}'), // ω
        ('J', '\u{03D1}'), // ϑ
        ('\u{00A1}', '\u{03D2}'), // ϒ
        ('j', '\u{03D5}'), // ϕ
        ('v', '\u{03D6}'), // ϖ
        // Arrows
        ('\u{00AB}', '\u{2194}'), // ↔
        ('\u{00AC}', '\u{2190}'), // ←
        ('\u{00AD}', '\u{2191}'), // ↑
        ('\u{00AE}', '\u{2192}'), // →
        ('\u{00AF}', '\u{2193}'), // ↓
        ('\u{00BF}', '\u{21B5}'), // ↵
        ('\u{00DB}', '\u{21D4}'), // ⇔
        ('\u{00DC}', '\u{21D0}'), // ⇐
        ('\u{00DD}', '\u{21D1}'), // ⇑
        ('\u{00DE}', '\u{21D2}'), // ⇒
        ('\u{00DF}', '\u{21D3}'), // ⇓
        // Mathematical symbols
        ('"', '\u{2200}'), // ∀
        ('$', '\u{2203}'), // ∃
        ('\'', '\u{220D}'), // ∍
        ('*', '\u{2217}'), // ∗
        ('-', '\u{2212}'), // −
        ('@', '\u{2245}'), // ≅
        ('\\', '\u{2234}'), // ∴
        ('^', '\u{22A5}'), // ⊥
        ('~', '\u{223C}'), // ∼
        ('\u{00A3}', '\u{2264}'), // ≤
        ('\u{00A5}', '\u{221E}'), // ∞
        ('\u{00B3}', '\u{2265}'), // ≥
        ('\u{00B5}', '\u{221D}'), // ∝
        ('\u{00B6}', '\u{2202}'), // ∂
        ('\u{00B7}', '\u{2219}'), // ∙
        ('\u{00B9}', '\u{2260}'), // ≠
        ('\u{00BA}', '\u{2261}'), // ≡
        ('\u{00BB}', '\u{2248}'), // ≈
        ('\u{00C4}', '\u{2297}'), // ⊗
        ('\u{00C5}', '\u{2295}'), // ⊕
        ('\u{00C6}', '\u{2205}'), // ∅
        ('\u{00C7}', '\u{2229}'), // ∩
        ('\u{00C8}', '\u{222A}'), // ∪
        ('\u{00C9}', '\u{2283}'), // ⊃
        ('\u{00CA}', '\u{2287}'), // ⊇
        ('\u{00CB}', '\u{2284}'), // ⊄
        ('\u{00CC}', '\u{2282}'), // ⊂
        ('\u{00CD}', '\u{2286}'), // ⊆
        ('\u{00CE}', '\u{2208}'), // ∈
        ('\u{00CF}', '\u{2209}'), // ∉
        ('\u{00D0}', '\u{2220}'), // ∠
        ('\u{00D1}', '\u{2207}'), // ∇
        ('\u{00D5}', '\u{220F}'), // ∏
        ('\u{00D6}', '\u{221A}'), // √
        ('\u{00D7}', '\u{22C5}'), // ⋅
        ('\u{00D9}', '\u{2227}'), // ∧
        ('\u{00DA}', '\u{2228}'), // ∨
        ('\u{00E5}', '\u{2211}'), // ∑
        ('\u{00F2}', '\u{222B}'), // ∫
        ('\u{00E0}', '\u{25CA}'), // ◊
        ('\u{00BD}', '\u{23D0}'), // ⏐
        ('\u{00BE}', '\u{23AF}'), // ⎯
        ('\u{00E1}', '\u{2329}'), // 〈
        ('\u{00E6}', '\u{239B}'), // ⎛
        ('\u{00E7}', '\u{239C}'), // ⎜
        ('\u{00E8}', '\u{239D}'), // ⎝
        ('\u{00E9}', '\u{23A1}'), // ⎡
        ('\u{00EA}', '\u{23A2}'), // ⎢
        ('\u{00EB}', '\u{23A3}'), // ⎣
        ('\u{00EC}', '\u{23A7}'), // ⎧
        ('\u{00ED}', '\u{23A8}'), // ⎨
        ('\u{00EE}', '\u{23A9}'), // ⎩
        ('\u{00EF}', '\u{23AA}'), // ⎪
        ('\u{00F1}', '\u{232A}'), // 〉
        ('\u{00F3}', '\u{2320}'), // ⌠
        ('\u{00F4}', '\u{23AE}'), // ⎮
        ('\u{00F5}', '\u{2321}'), // ⌡
        ('\u{00F6}', '\u{239E}'), // ⎞
        ('\u{00F7}', '\u{239F}'), // ⎟
        ('\u{00F8}', '\u{23A0}'), // ⎠
        ('\u{00F9}', '\u{23A4}'), // ⎤
        ('\u{00FA}', '\u{23A5}'), // ⎥
        ('\u{00FB}', '\u{23A6}'), // ⎦
        ('\u{00FC}', '\u{23AB}'), // ⎫
        ('\u{00FD}', '\u{23AC}'), // ⎬
        ('\u{00FE}', '\u{23AD}'), // ⎭
        ('\u{00B4}', '\u{00D7}'), // ×
        ('\u{00B8}', '\u{00F7}'), // ÷
        ('\u{00D8}', '\u{00AC}'), // ¬
    ])
});

/// The character that `ch` displays as in the Symbol font (`ch` itself if the
/// font draws it unchanged).
#[must_use]
pub fn symbol_font_char(ch: char) -> char {
    SYMBOL_FONT.get(&ch).copied().unwrap_or(ch)
}

/// Remap every character of `text` through the Symbol font table.
///
/// # Example
/// ```
/// use sieve_html::decoder::convert_symbol_font;
///
/// assert_eq!(convert_symbol_font("a+b=p"), "α+β=π");
/// ```
#[must_use]
pub fn convert_symbol_font(text: &str) -> String {
    text.chars().map(symbol_font_char).collect()
}
