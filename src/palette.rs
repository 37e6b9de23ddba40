//! Named colors the registry draws from.
//!
//! The first 48 entries of the XKCD color survey, which are chosen to be
//! distinguishable from each other by name.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl NamedColor {
    pub const fn new(name: &'static str, hex: u32) -> Self {
        Self {
            name,
            rgb: ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
        }
    }

    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex())
    }
}

pub const NAMED_COLORS: &[NamedColor] = &[
    NamedColor::new("purple", 0x7e1e9c),
    NamedColor::new("green", 0x15b01a),
    NamedColor::new("blue", 0x0343df),
    NamedColor::new("pink", 0xff81c0),
    NamedColor::new("brown", 0x653700),
    NamedColor::new("red", 0xe50000),
    NamedColor::new("light blue", 0x95d0fc),
    NamedColor::new("teal", 0x029386),
    NamedColor::new("orange", 0xf97306),
    NamedColor::new("light green", 0x96f97b),
    NamedColor::new("magenta", 0xc20078),
    NamedColor::new("yellow", 0xffff14),
    NamedColor::new("sky blue", 0x75bbfd),
    NamedColor::new("grey", 0x929591),
    NamedColor::new("lime green", 0x89fe05),
    NamedColor::new("light purple", 0xbf77f6),
    NamedColor::new("violet", 0x9a0eea),
    NamedColor::new("dark green", 0x033500),
    NamedColor::new("turquoise", 0x06c2ac),
    NamedColor::new("lavender", 0xc79fef),
    NamedColor::new("dark blue", 0x00035b),
    NamedColor::new("tan", 0xd1b26f),
    NamedColor::new("cyan", 0x00ffff),
    NamedColor::new("aqua", 0x13eac9),
    NamedColor::new("forest green", 0x06470c),
    NamedColor::new("mauve", 0xae7181),
    NamedColor::new("dark purple", 0x35063e),
    NamedColor::new("bright green", 0x01ff07),
    NamedColor::new("maroon", 0x650021),
    NamedColor::new("olive", 0x6e750e),
    NamedColor::new("salmon", 0xff796c),
    NamedColor::new("beige", 0xe6daa6),
    NamedColor::new("royal blue", 0x0504aa),
    NamedColor::new("navy blue", 0x001146),
    NamedColor::new("lilac", 0xcea2fd),
    NamedColor::new("black", 0x000000),
    NamedColor::new("hot pink", 0xff028d),
    NamedColor::new("light brown", 0xad8150),
    NamedColor::new("pale green", 0xc7fdb5),
    NamedColor::new("peach", 0xffb07c),
    NamedColor::new("olive green", 0x677a04),
    NamedColor::new("dark pink", 0xcb416b),
    NamedColor::new("periwinkle", 0x8e82fe),
    NamedColor::new("sea green", 0x53fca1),
    NamedColor::new("lime", 0xaaff32),
    NamedColor::new("indigo", 0x380282),
    NamedColor::new("mustard", 0xceb301),
    NamedColor::new("light pink", 0xffd1df),
];
