use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// The 20-colour categorical palette used for party bars.
pub const TAB20: [(u8, u8, u8); 20] = [
    (0x1f, 0x77, 0xb4),
    (0xae, 0xc7, 0xe8),
    (0xff, 0x7f, 0x0e),
    (0xff, 0xbb, 0x78),
    (0x2c, 0xa0, 0x2c),
    (0x98, 0xdf, 0x8a),
    (0xd6, 0x27, 0x28),
    (0xff, 0x98, 0x96),
    (0x94, 0x67, 0xbd),
    (0xc5, 0xb0, 0xd5),
    (0x8c, 0x56, 0x4b),
    (0xc4, 0x9c, 0x94),
    (0xe3, 0x77, 0xc2),
    (0xf7, 0xb6, 0xd2),
    (0x7f, 0x7f, 0x7f),
    (0xc7, 0xc7, 0xc7),
    (0xbc, 0xbd, 0x22),
    (0xdb, 0xdb, 0x8d),
    (0x17, 0xbe, 0xcf),
    (0x9e, 0xda, 0xe5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Stable colour for a party name: the digest taken mod 1000 picks a point
/// in [0, 1) which is mapped onto the palette.
pub fn color_for(name: &str) -> Rgb {
    let digest = Sha1::digest(name.as_bytes());
    let bucket = digest
        .iter()
        .fold(0u32, |acc, b| (acc * 256 + *b as u32) % 1000);
    let index = (bucket as usize * TAB20.len()) / 1000;
    let (r, g, b) = TAB20[index];
    Rgb(r, g, b)
}
