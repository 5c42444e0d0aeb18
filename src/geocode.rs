//! District-name geocoding against a curated gazetteer for Kabupaten
//! Bandung.
//!
//! Table order is part of the contract: when the exact lookup misses, the
//! first entry whose key is contained in the lookup key wins. Unmatched
//! districts are expected (free-text input) and resolve silently to no
//! coordinates.

/// Kecamatan name -> (lat, lon), curated manually. Keep in this order.
pub const GAZETTEER: [(&str, (f64, f64)); 32] = [
    ("baleendah", (-6.9996, 107.6216)),
    ("margahayu", (-6.9717, 107.5847)),
    ("cileunyi", (-6.9400, 107.7300)),
    ("soreang", (-7.0252, 107.5259)),
    ("bojongsoang", (-6.9892, 107.6444)),
    ("majalaya", (-7.0349, 107.7533)),
    ("margaasih", (-6.9480, 107.5400)),
    ("banjaran", (-7.0450, 107.5900)),
    ("rancaekek", (-6.9600, 107.7700)),
    ("cicalengka", (-6.9875, 107.8401)),
    ("cangkuang", (-7.0700, 107.5500)),
    ("ciparay", (-7.0350, 107.6500)),
    ("katapang", (-7.0000, 107.5600)),
    ("arjasari", (-7.0800, 107.6300)),
    ("cimenyan", (-6.8787, 107.6646)),
    ("ciwidey", (-7.0990, 107.4337)),
    ("cilengkrang", (-6.9050, 107.6941)),
    ("paseh", (-7.0313, 107.7905)),
    ("kutawaringin", (-6.9992, 107.5066)),
    ("solokanjeruk", (-7.0100, 107.7300)),
    ("solokan jeruk", (-7.0100, 107.7300)),
    ("pameungpeuk", (-7.0175, 107.6042)),
    ("cikancung", (-7.0050, 107.8250)),
    ("dayeuhkolot", (-6.9855, 107.6223)),
    ("pangalengan", (-7.1783, 107.5645)),
    ("ibun", (-7.1000, 107.7800)),
    ("cimaung", (-7.0600, 107.5500)),
    ("pasirjambu", (-7.0900, 107.4700)),
    ("pacet", (-7.0800, 107.7300)),
    ("nagreg", (-7.0300, 107.8900)),
    ("kertasari", (-7.2100, 107.6700)),
    ("rancabali", (-7.1500, 107.3900)),
];

/// Administrative noise words stripped from the lookup key. "kec." is
/// handled separately because the trailing dot is part of the token.
const STOP_TOKENS: [&str; 3] = ["kecamatan", "kota", "kabupaten"];

/// Build the gazetteer lookup key: lower-case, drop administrative prefixes
/// and punctuation, collapse whitespace.
pub fn gazetteer_key(s: &str) -> String {
    let lower = s.trim().to_lowercase().replace("kec.", " ");
    // Punctuation acts as a word boundary and is then dropped.
    let cleaned: String = lower
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|tok| !STOP_TOKENS.contains(tok))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a cleaned district label to fixed-point coordinates.
///
/// Exact key match is tried over the whole table before any substring
/// fallback, so a gazetteer key always resolves to its own coordinate.
pub fn geocode(district_clean: &str) -> Option<(f64, f64)> {
    let key = gazetteer_key(district_clean);
    if key.is_empty() {
        return None;
    }
    for (name, coord) in GAZETTEER {
        if name == key {
            return Some(coord);
        }
    }
    for (name, coord) in GAZETTEER {
        if key.contains(name) {
            return Some(coord);
        }
    }
    None
}
