// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo patches built through the public builder API.

use pdfile::{ObjectBox, PatchError, PatchFile, PatchFileConfig, Position, Size};

/// Spelled-out digits used when no word list is given.
pub const DEFAULT_WORDS: [&str; 9] = [
    "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

/// Canvas settings for demos when no config is found.
pub fn demo_config() -> PatchFileConfig {
    PatchFileConfig {
        screen_position: Position::new(10, 10),
        size: Size::new(300, 300),
        font_size: 16,
        ..PatchFileConfig::default()
    }
}

/// Patch mapping a number `n` on its inlet to the symbol `words[n - 1]` on
/// its outlet.
///
/// `inlet -> select 1..N`, the N-th `select` outlet feeds `symbol <word>`,
/// and every symbol feeds the single outlet.
pub fn digits<S: AsRef<str>>(
    destination: &str,
    config: &PatchFileConfig,
    words: &[S],
) -> Result<PatchFile, PatchError> {
    let mut file = PatchFile::with_config(destination, config);
    let main = file.main_mut();
    main.add(ObjectBox::new("inlet"), Some("in"));
    main.add(ObjectBox::new("outlet"), Some("out"));
    main.add(ObjectBox::new("select").args(1..=words.len()), Some("select"));
    main.connect("in", 0, "select", 0)?;
    for (i, word) in words.iter().enumerate() {
        let name = format!("digit_{}", i + 1);
        main.add(
            ObjectBox::new("symbol").arg(word.as_ref()),
            Some(name.as_str()),
        );
        main.connect("select", i, &name, 0)?;
        main.connect(&name, 0, "out", 0)?;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn default_words_give_nineteen_connections() {
        let file = digits("d.pd", &demo_config(), &DEFAULT_WORDS[..]).unwrap();
        assert_eq!(file.main().layout().connections().len(), 19);
        assert_eq!(file.main().layout().object_count(), 12);
    }
}
