//! Built-in 8×8 glyph set. Rows are drawn as text, `#` lit, leftmost
//! character is column 0 (bit 0).
use crate::core::GLYPH_COUNT;

/// Convert eight text rows into a glyph bitmap.
const fn glyph(art: [&str; 8]) -> [u8; 8] {
    let mut rows = [0u8; 8];
    let mut r = 0;
    while r < 8 {
        let line = art[r].as_bytes();
        let mut c = 0;
        while c < 8 && c < line.len() {
            if line[c] == b'#' {
                rows[r] |= 1 << c;
            }
            c += 1;
        }
        r += 1;
    }
    rows
}

/// Single lit row.
const fn line(row: usize) -> [u8; 8] {
    let mut rows = [0u8; 8];
    rows[row] = 0xFF;
    rows
}

pub const GLYPH_FRAME_THICK: u8 = 10;
pub const GLYPH_FRAME_THIN: u8 = 11;
pub const GLYPH_BLANK: u8 = 12;
pub const GLYPH_DOT_SMALL: u8 = 13;
pub const GLYPH_DOT_MEDIUM: u8 = 14;
pub const GLYPH_DOT_LARGE: u8 = 15;
pub const GLYPH_FRAME_FULL: u8 = 16;
pub const GLYPH_ARROW_UP: u8 = 17;
pub const GLYPH_ARROW_DOWN: u8 = 18;
pub const GLYPH_DIAGONAL: u8 = 19;
pub const GLYPH_EMPTY: u8 = 20;
/// First of the eight single-line glyphs, bottom row first.
pub const GLYPH_LINE_BOTTOM: u8 = 21;
pub const GLYPH_LINE_TOP: u8 = 28;
pub const GLYPH_SPACE: u8 = 29;
pub const GLYPH_KG: u8 = 49;
pub const GLYPH_EG: u8 = 50;
pub const GLYPH_OG: u8 = 51;

const EMPTY: [u8; 8] = [0; 8];

pub(super) const DEFAULT_GLYPHS: [[u8; 8]; GLYPH_COUNT] = [
    // 0
    glyph([
        "..####..", ".##..##.", ".##.###.", ".######.", ".###.##.", ".##..##.", "..####..",
        "........",
    ]),
    // 1
    glyph([
        "...##...", "..###...", ".####...", "...##...", "...##...", "...##...", ".######.",
        "........",
    ]),
    // 2
    glyph([
        "..####..", ".##..##.", ".....##.", "....##..", "..##....", ".##.....", ".######.",
        "........",
    ]),
    // 3
    glyph([
        "..####..", ".##..##.", ".....##.", "...###..", ".....##.", ".##..##.", "..####..",
        "........",
    ]),
    // 4
    glyph([
        "....##..", "...###..", "..####..", ".##.##..", ".######.", "....##..", "....##..",
        "........",
    ]),
    // 5
    glyph([
        ".######.", ".##.....", ".#####..", ".....##.", ".....##.", ".##..##.", "..####..",
        "........",
    ]),
    // 6
    glyph([
        "..####..", ".##.....", ".#####..", ".##..##.", ".##..##.", ".##..##.", "..####..",
        "........",
    ]),
    // 7
    glyph([
        ".######.", ".....##.", "....##..", "...##...", "..##....", "..##....", "..##....",
        "........",
    ]),
    // 8
    glyph([
        "..####..", ".##..##.", ".##..##.", "..####..", ".##..##.", ".##..##.", "..####..",
        "........",
    ]),
    // 9
    glyph([
        "..####..", ".##..##.", ".##..##.", "..#####.", ".....##.", "....##..", "..###...",
        "........",
    ]),
    // 10 thick frame
    glyph([
        "########", "########", "##....##", "##....##", "##....##", "##....##", "########",
        "########",
    ]),
    // 11 thin frame
    glyph([
        "########", "#......#", "#......#", "#......#", "#......#", "#......#", "#......#",
        "########",
    ]),
    // 12 blank
    EMPTY,
    // 13 small dot
    glyph([
        "........", "........", "........", "...##...", "...##...", "........", "........",
        "........",
    ]),
    // 14 medium dot
    glyph([
        "........", "........", "..####..", "..####..", "..####..", "..####..", "........",
        "........",
    ]),
    // 15 large dot
    glyph([
        "........", ".######.", ".######.", ".######.", ".######.", ".######.", ".######.",
        "........",
    ]),
    // 16 full frame
    [0xFF; 8],
    // 17 arrow up
    glyph([
        "...##...", "..####..", ".######.", "########", "...##...", "...##...", "...##...",
        "...##...",
    ]),
    // 18 arrow down
    glyph([
        "...##...", "...##...", "...##...", "...##...", "########", ".######.", "..####..",
        "...##...",
    ]),
    // 19 diagonal
    glyph([
        "#.......", ".#......", "..#.....", "...#....", "....#...", ".....#..", "......#.",
        ".......#",
    ]),
    // 20 empty
    EMPTY,
    // 21..=28 single lines, bottom to top
    line(7),
    line(6),
    line(5),
    line(4),
    line(3),
    line(2),
    line(1),
    line(0),
    // 29 space
    EMPTY,
    // 30 A
    glyph([
        "..####..", ".##..##.", ".##..##.", ".######.", ".##..##.", ".##..##.", ".##..##.",
        "........",
    ]),
    // 31 B
    glyph([
        ".#####..", ".##..##.", ".##..##.", ".#####..", ".##..##.", ".##..##.", ".#####..",
        "........",
    ]),
    // 32 C
    glyph([
        "..####..", ".##..##.", ".##.....", ".##.....", ".##.....", ".##..##.", "..####..",
        "........",
    ]),
    // 33 G
    glyph([
        "..####..", ".##..##.", ".##.....", ".##.###.", ".##..##.", ".##..##.", "..#####.",
        "........",
    ]),
    // 34 K
    glyph([
        ".##..##.", ".##.##..", ".####...", ".###....", ".####...", ".##.##..", ".##..##.",
        "........",
    ]),
    // 35 lower-case g
    glyph([
        "........", "..#####.", ".##..##.", ".##..##.", "..#####.", ".....##.", ".####...",
        "........",
    ]),
    // 36 minus one
    glyph([
        "......#.", ".....##.", "......#.", "####..#.", "......#.", "......#.", ".....###",
        "........",
    ]),
    // 37 R
    glyph([
        ".#####..", ".##..##.", ".##..##.", ".#####..", ".####...", ".##.##..", ".##..##.",
        "........",
    ]),
    // 38 upper-case gamma
    glyph([
        ".######.", ".##.....", ".##.....", ".##.....", ".##.....", ".##.....", ".##.....",
        "........",
    ]),
    // 39 M
    glyph([
        "##....##", "###..###", "########", "##.##.##", "##....##", "##....##", "##....##",
        "........",
    ]),
    // 40 P
    glyph([
        ".#####..", ".##..##.", ".##..##.", ".#####..", ".##.....", ".##.....", ".##.....",
        "........",
    ]),
    // 41 minus two
    glyph([
        ".....##.", "....#..#", ".......#", "###...#.", ".....#..", "....#...", "....####",
        "........",
    ]),
    // 42 cross pattern
    glyph([
        "#......#", ".#....#.", "..#..#..", "...##...", "...##...", "..#..#..", ".#....#.",
        "#......#",
    ]),
    // 43 checker pattern
    glyph([
        "#.#.#.#.", ".#.#.#.#", "#.#.#.#.", ".#.#.#.#", "#.#.#.#.", ".#.#.#.#", "#.#.#.#.",
        ".#.#.#.#",
    ]),
    // 44 S
    glyph([
        "..####..", ".##..##.", ".##.....", "..####..", ".....##.", ".##..##.", "..####..",
        "........",
    ]),
    // 45 zero, left half
    glyph([
        "..###...", ".##.##..", ".##.##..", ".##.##..", ".##.##..", ".##.##..", "..###...",
        "........",
    ]),
    // 46 zero, right half
    glyph([
        "...###..", "..##.##.", "..##.##.", "..##.##.", "..##.##.", "..##.##.", "...###..",
        "........",
    ]),
    // 47 E
    glyph([
        ".######.", ".##.....", ".##.....", ".#####..", ".##.....", ".##.....", ".######.",
        "........",
    ]),
    // 48 L
    glyph([
        ".##.....", ".##.....", ".##.....", ".##.....", ".##.....", ".##.....", ".######.",
        "........",
    ]),
    // 49 K and gamma
    glyph([
        "#..#.###", "#.#..#..", "##...#..", "#.#..#..", "#..#.#..", "#..#.#..", "........",
        "........",
    ]),
    // 50 E and gamma
    glyph([
        "###..###", "#....#..", "##...#..", "#....#..", "#....#..", "###..#..", "........",
        "........",
    ]),
    // 51 O and gamma
    glyph([
        ".##..###", "#..#.#..", "#..#.#..", "#..#.#..", "#..#.#..", ".##..#..", "........",
        "........",
    ]),
];
