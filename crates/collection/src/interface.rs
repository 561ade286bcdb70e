//! ERC-165 interface identifiers advertised by the collection.

use alloy_primitives::{fixed_bytes, FixedBytes};

/// ERC-165 itself.
pub const ERC165_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x01ffc9a7");
/// ERC-721 non-fungible tokens.
pub const ERC721_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x80ac58cd");
/// ERC-721 metadata extension.
pub const ERC721_METADATA_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x5b5e139f");
/// ERC-2981 royalties.
pub const ERC2981_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x2a55205a");

const SUPPORTED: [FixedBytes<4>; 4] =
    [ERC165_INTERFACE_ID, ERC721_INTERFACE_ID, ERC721_METADATA_INTERFACE_ID, ERC2981_INTERFACE_ID];

/// Whether `interface_id` is one of the advertised interfaces.
pub fn supports_interface(interface_id: FixedBytes<4>) -> bool {
    SUPPORTED.contains(&interface_id)
}
