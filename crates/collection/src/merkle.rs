//! Keccak Merkle trees with sorted-pair hashing.
//!
//! Each internal node is `keccak256(min(a, b) ‖ max(a, b))`, so proofs carry no
//! direction bits. Leaves are `keccak256(address)`. A level with an odd node
//! count promotes its last node unchanged.

use alloy_primitives::{keccak256, Address, Keccak256, B256};

/// Leaf hash committed for an allowlisted address.
pub fn leaf_hash(account: Address) -> B256 {
    keccak256(account)
}

/// Combines two nodes in ascending byte order.
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(low);
    hasher.update(high);
    hasher.finalize()
}

/// Folds `proof` onto `leaf`, returning the implied root.
pub fn process_proof(proof: &[B256], leaf: B256) -> B256 {
    proof.iter().fold(leaf, |node, sibling| hash_pair(&node, sibling))
}

/// Whether `proof` places `leaf` under `root`.
pub fn verify(proof: &[B256], root: B256, leaf: B256) -> bool {
    process_proof(proof, leaf) == root
}

/// Off-chain tree builder producing roots and proofs the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` holds the leaves, the last level holds the root.
    levels: Vec<Vec<B256>>,
}

impl MerkleTree {
    /// Builds a tree over already-hashed leaves, kept in the given order.
    pub fn from_leaves(leaves: Vec<B256>) -> Self {
        let mut levels = Vec::new();
        let mut current = leaves;
        while current.len() > 1 {
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hash_pair(a, b),
                    nodes => nodes[0],
                })
                .collect();
            levels.push(std::mem::replace(&mut current, next));
        }
        levels.push(current);
        Self { levels }
    }

    /// Builds a tree whose leaves are [`leaf_hash`] of each address.
    pub fn from_addresses(accounts: &[Address]) -> Self {
        Self::from_leaves(accounts.iter().copied().map(leaf_hash).collect())
    }

    /// Root of the tree, or the zero hash for an empty tree.
    pub fn root(&self) -> B256 {
        self.levels.last().and_then(|level| level.first()).copied().unwrap_or(B256::ZERO)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Proof for the first leaf equal to `leaf`, if present.
    pub fn proof(&self, leaf: &B256) -> Option<Vec<B256>> {
        let mut index = self.levels.first()?.iter().position(|node| node == leaf)?;
        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                proof.push(*node);
            }
            index /= 2;
        }
        Some(proof)
    }

    /// Proof for `account`, if it is one of the leaves.
    pub fn proof_for(&self, account: Address) -> Option<Vec<B256>> {
        self.proof(&leaf_hash(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const A: Address = address!("0x00000000000000000000000000000000000000a1");
    const B: Address = address!("0x00000000000000000000000000000000000000b1");
    const C: Address = address!("0x00000000000000000000000000000000000000c1");
    const D: Address = address!("0x00000000000000000000000000000000000000d1");

    #[test]
    fn pair_hash_is_order_independent() {
        let (x, y) = (leaf_hash(A), leaf_hash(B));
        assert_eq!(hash_pair(&x, &y), hash_pair(&y, &x));
        assert_ne!(hash_pair(&x, &y), hash_pair(&x, &x));
    }

    #[test]
    fn two_leaf_tree_root_and_proofs() {
        let tree = MerkleTree::from_addresses(&[A, B]);
        assert_eq!(tree.root(), hash_pair(&leaf_hash(A), &leaf_hash(B)));

        let proof = tree.proof_for(A).unwrap();
        assert_eq!(proof, vec![leaf_hash(B)]);
        assert!(verify(&proof, tree.root(), leaf_hash(A)));
        assert!(verify(&tree.proof_for(B).unwrap(), tree.root(), leaf_hash(B)));
    }

    #[test]
    fn odd_leaf_is_promoted() {
        let tree = MerkleTree::from_addresses(&[A, B, C]);
        let expected = hash_pair(&hash_pair(&leaf_hash(A), &leaf_hash(B)), &leaf_hash(C));
        assert_eq!(tree.root(), expected);

        let proof = tree.proof_for(C).unwrap();
        assert_eq!(proof.len(), 1, "promoted leaf skips the missing sibling");
        assert!(verify(&proof, tree.root(), leaf_hash(C)));
    }

    #[test]
    fn every_member_verifies() {
        let accounts = [A, B, C, D];
        let tree = MerkleTree::from_addresses(&accounts);
        for account in accounts {
            let proof = tree.proof_for(account).unwrap();
            assert!(verify(&proof, tree.root(), leaf_hash(account)), "{account} should verify");
        }
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn proof_from_other_tree_fails() {
        let committed = MerkleTree::from_addresses(&[A, B]);
        let other = MerkleTree::from_addresses(&[A, B, C]);
        let foreign = other.proof_for(A).unwrap();
        assert!(!verify(&foreign, committed.root(), leaf_hash(A)));
        assert!(!verify(&[], committed.root(), leaf_hash(A)));
    }

    #[test]
    fn missing_member_has_no_proof() {
        let tree = MerkleTree::from_addresses(&[A, B]);
        assert!(tree.proof_for(C).is_none());
        assert!(MerkleTree::from_addresses(&[]).is_empty());
        assert_eq!(MerkleTree::from_addresses(&[]).root(), B256::ZERO);
    }

    #[test]
    fn single_leaf_tree_root_is_the_leaf() {
        let tree = MerkleTree::from_addresses(&[A]);
        assert_eq!(tree.root(), leaf_hash(A));
        assert_eq!(tree.proof_for(A), Some(vec![]));
    }
}
