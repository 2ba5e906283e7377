use crate::model::{BLOCK_ID, IdGenerator, Node};

/// Gives every identity-eligible node without a non-empty `blockId` a fresh
/// one, parents before children. Existing IDs are never replaced.
pub fn assign_block_ids(nodes: &mut [Node], ids: &mut impl IdGenerator) {
    for node in nodes {
        if node.kind.is_identity_eligible() && node.block_id().is_none() {
            node.attrs.insert(BLOCK_ID.to_string(), ids.next_id().into());
        }
        assign_block_ids(&mut node.content, ids);
    }
}
