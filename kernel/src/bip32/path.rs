//! HDK path parsing and walking: `m/44'/0'/0'/0/0`-style strings, ported
//! from `get_hdk_intermediate_values` in the original C source.

use super::{derive_hardened_child, derive_normal_child, ChildIndex, ExtendedPrivateKey};
use crate::error::CoreError;

/// One step of a walked HDK path: the child index applied at this depth
/// and the resulting extended private key (so a caller can print every
/// intermediate xprv/xpub, not just the leaf — matching the original's
/// per-step printing).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub index: ChildIndex,
    pub key: ExtendedPrivateKey,
}

/// Parses a single path segment (`"44'"`, `"0"`, ...) into a [`ChildIndex`].
fn parse_segment(segment: &str) -> Result<ChildIndex, CoreError> {
    let (digits, hardened) = match segment.strip_suffix('\'').or_else(|| segment.strip_suffix('h')) {
        Some(rest) => (rest, true),
        None => (segment, false),
    };
    let value: u32 = digits
        .parse()
        .map_err(|_| CoreError::InvalidInput("HDK path segment is not a decimal index"))?;
    if value >= 0x8000_0000 {
        return Err(CoreError::InvalidInput("HDK path index must be < 2^31 before the hardened marker"));
    }
    Ok(if hardened { ChildIndex::Hardened(value) } else { ChildIndex::Normal(value) })
}

/// Parses an `m/44'/0'/0'/0/0`-style path into its ordered list of child
/// indices. The leading `m` (and following `/`) is required and stripped.
pub fn parse_path(path: &str) -> Result<Vec<ChildIndex>, CoreError> {
    let rest = path
        .strip_prefix("m/")
        .or_else(|| if path == "m" { Some("") } else { None })
        .ok_or(CoreError::InvalidInput("HDK path must start with \"m/\""))?;
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    rest.split('/').map(parse_segment).collect()
}

/// Walks `path` from the master key, deriving each intermediate extended
/// private key in turn and returning the full trail (master excluded —
/// callers that want the master too can prepend it themselves).
pub fn derive_path(
    master: &ExtendedPrivateKey,
    path: &str,
) -> Result<Vec<PathStep>, CoreError> {
    let indices = parse_path(path)?;
    let mut steps = Vec::with_capacity(indices.len());
    let mut parent = master.clone();
    for index in indices {
        let child = match index {
            ChildIndex::Normal(i) => derive_normal_child(&parent, i)?,
            ChildIndex::Hardened(i) => derive_hardened_child(&parent, i)?,
        };
        steps.push(PathStep { index, key: child.clone() });
        parent = child;
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip39;
    use crate::bip32::master_key;

    fn master_from_zero_entropy() -> ExtendedPrivateKey {
        let mnemonic = bip39::mnemonic_from_entropy(&[0u8; 32]);
        let seed = bip39::seed_from_mnemonic(&mnemonic, "");
        master_key(&seed).unwrap()
    }

    #[test]
    fn parses_mixed_hardened_and_normal_segments() {
        let parsed = parse_path("m/44'/0'/0'/0/0").unwrap();
        assert_eq!(
            parsed,
            vec![
                ChildIndex::Hardened(44),
                ChildIndex::Hardened(0),
                ChildIndex::Hardened(0),
                ChildIndex::Normal(0),
                ChildIndex::Normal(0),
            ]
        );
    }

    #[test]
    fn bare_m_is_the_empty_path() {
        assert_eq!(parse_path("m").unwrap(), Vec::new());
    }

    #[test]
    fn rejects_path_missing_the_m_prefix() {
        assert!(parse_path("44'/0'").is_err());
    }

    #[test]
    fn walk_produces_one_step_per_segment_with_increasing_depth() {
        let master = master_from_zero_entropy();
        let steps = derive_path(&master, "m/44'/0'/0'/0/0").unwrap();
        assert_eq!(steps.len(), 5);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.key.depth as usize, i + 1);
        }
        assert_eq!(steps[0].index, ChildIndex::Hardened(44));
        assert_eq!(steps[4].index, ChildIndex::Normal(0));
    }
}
