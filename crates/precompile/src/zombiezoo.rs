//! Zombiezoo collection precompile.

use crate::revert::{revert_reason, NON_PAYABLE, URI_QUERY_FOR_NONEXISTENT_TOKEN};
use alloy::{
    sol,
    sol_types::{SolInterface, SolValue},
};
use alloy_evm::{
    precompiles::{Precompile, PrecompileInput},
    revm::precompile::{PrecompileError, PrecompileId, PrecompileResult},
    EvmInternals, EvmInternalsError,
};
use alloy_primitives::{address, Address, Bytes, U256};
use revm::{bytecode::Bytecode, precompile::PrecompileOutput};
use std::sync::{Arc, OnceLock};
use zbz_collection::{
    ActivationConfig, Collection, CollectionError, FundsError, FundsRail, PublicMint, Role,
};

sol! {
    /// Zombiezoo collection interface.
    interface IZombiezoo {
        function activate(
            uint256 startIndex,
            uint256 totalSupply,
            string baseURI,
            address fundRecipient
        ) external;
        function setVerifier(address verifier) external;
        function revokeVerifier(address verifier) external;
        function isVerifier(address account) external view returns (bool);
        function grantAdmin(address account) external;
        function revokeAdmin(address account) external;
        function isAdmin(address account) external view returns (bool);
        function transferOwnership(address newOwner) external;
        function owner() external view returns (address);
        function setPreSaleRoot(bytes32 root) external;
        function preSaleRoot() external view returns (bytes32);
        function presaleMinted(address account) external view returns (uint256);

        /// Issues a reserved token. Admin only.
        function mintTo(address to, uint256 tokenId) external;
        /// Redeems a verifier-signed authorization for the next public token.
        function mint(
            uint256 tokenId,
            uint256 salt,
            bytes signature,
            bytes32[] proof
        ) external payable returns (uint256);
        function finalized(bytes32 fingerprint) external view returns (bool);

        function name() external view returns (string);
        function symbol() external view returns (string);
        function UNIT_PRICE() external view returns (uint256);
        function MAX_PRESALE_PER_MINTER() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function fundRecipient() external view returns (address);
        function tokenURI(uint256 tokenId) external view returns (string);
        function royaltyInfo(uint256 tokenId, uint256 salePrice)
            external
            view
            returns (address receiver, uint256 royaltyAmount);
        function ownerOf(uint256 tokenId) external view returns (address);
        function balanceOf(address owner) external view returns (uint256);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

use IZombiezoo::IZombiezooCalls;

/// Zombiezoo precompile address: 0x00..0f200
pub const ZOMBIEZOO_PRECOMPILE_ADDR: Address =
    address!("0x000000000000000000000000000000000000F200");

/// Storage slot of the precompile account holding the collection revision.
pub const REVISION_SLOT: U256 = U256::ZERO;

/// Stateful precompile that serves the collection at [`ZOMBIEZOO_PRECOMPILE_ADDR`].
///
/// Collection state is shared between clones. Its revision is mirrored in
/// [`REVISION_SLOT`] of the precompile account, so reverting the EVM journal
/// also rewinds that slot; the next call rolls the collection back to match.
/// Mint payments arrive as call value on the precompile account and are
/// forwarded to the fund recipient through the journal.
#[derive(Clone, Debug)]
pub struct ZombiezooPrecompile {
    collection: Arc<Collection>,
}

impl ZombiezooPrecompile {
    // Use a lazily-initialized static for the ID since `custom` is not const.
    /// Precompile identifier.
    pub fn id() -> &'static PrecompileId {
        static ID: OnceLock<PrecompileId> = OnceLock::new();
        ID.get_or_init(|| PrecompileId::custom("zombiezoo"))
    }

    /// Wraps a shared collection.
    pub const fn new(collection: Arc<Collection>) -> Self {
        Self { collection }
    }

    /// Deploys a fresh collection administered by `deployer`.
    pub fn deploy(deployer: Address) -> Self {
        Self::new(Arc::new(Collection::new(deployer)))
    }

    /// The collection served by this precompile.
    pub fn collection(&self) -> &Arc<Collection> {
        &self.collection
    }

    /// Bytecode marker for the precompile account.
    ///
    /// The invalid instruction `0xFE` keeps the account, and the revision slot
    /// stored on it, from being pruned as empty.
    fn bytecode() -> &'static Bytecode {
        static BYTECODE: OnceLock<Bytecode> = OnceLock::new();
        BYTECODE.get_or_init(|| Bytecode::new_raw(Bytes::from_static(&[0xFE])))
    }

    fn map_internals_error(err: EvmInternalsError) -> PrecompileError {
        PrecompileError::Other(err.to_string())
    }

    fn ensure_account_created(
        internals: &mut EvmInternals<'_>,
        addr: Address,
    ) -> Result<(), PrecompileError> {
        let account = internals.load_account(addr).map_err(Self::map_internals_error)?;

        if account.is_loaded_as_not_existing() {
            if addr == ZOMBIEZOO_PRECOMPILE_ADDR {
                internals.set_code(addr, Self::bytecode().clone());
                internals.nonce_bump_journal_entry(addr);
            }
            internals.touch_account(addr);
        }

        Ok(())
    }

    // === Revision Storage ===

    /// Rolls the collection back to the revision recorded in the EVM state.
    ///
    /// The slot only lags behind the collection when the journal entries that
    /// advanced it were reverted, so the surplus mutations are undone. A slot
    /// ahead of the collection means another collection wrote it.
    fn sync_revision(
        &self,
        internals: &mut EvmInternals<'_>,
        caller: Address,
    ) -> Result<(), PrecompileError> {
        Self::ensure_account_created(internals, ZOMBIEZOO_PRECOMPILE_ADDR)?;
        let value = internals
            .sload(ZOMBIEZOO_PRECOMPILE_ADDR, REVISION_SLOT)
            .map_err(Self::map_internals_error)?;
        let stored = u64::try_from(*value)
            .map_err(|_| PrecompileError::Other("corrupt collection revision".to_string()))?;

        let undone = self
            .collection
            .revert_to(stored)
            .map_err(|err| PrecompileError::Other(revert_reason(&err, caller)))?;
        if undone > 0 {
            tracing::info!(
                target: "zbz::precompile",
                revision = stored,
                undone,
                "collection rolled back to journaled revision"
            );
        }
        Ok(())
    }

    fn store_revision(
        internals: &mut EvmInternals<'_>,
        revision: u64,
    ) -> Result<(), PrecompileError> {
        internals
            .sstore(ZOMBIEZOO_PRECOMPILE_ADDR, REVISION_SLOT, U256::from(revision))
            .map_err(Self::map_internals_error)?;
        internals.touch_account(ZOMBIEZOO_PRECOMPILE_ADDR);
        Ok(())
    }

    fn dispatch(
        &self,
        call: IZombiezooCalls,
        caller: Address,
        value: U256,
        source: Address,
        internals: &mut EvmInternals<'_>,
    ) -> Result<Bytes, PrecompileError> {
        let collection = &*self.collection;
        let revert = |err: CollectionError| PrecompileError::Other(revert_reason(&err, caller));

        let output = match call {
            IZombiezooCalls::activate(call) => {
                let config = ActivationConfig::new(
                    call.startIndex,
                    call.totalSupply,
                    call.baseURI,
                    call.fundRecipient,
                );
                collection.activate(caller, config).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::setVerifier(call) => {
                collection.set_verifier(caller, call.verifier).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::revokeVerifier(call) => {
                collection.revoke_verifier(caller, call.verifier).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::isVerifier(call) => {
                collection.is_verifier(call.account).abi_encode().into()
            }
            IZombiezooCalls::grantAdmin(call) => {
                collection.grant_admin(caller, call.account).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::revokeAdmin(call) => {
                collection.revoke_admin(caller, call.account).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::isAdmin(call) => {
                collection.has_role(Role::Admin, call.account).abi_encode().into()
            }
            IZombiezooCalls::transferOwnership(call) => {
                collection.transfer_ownership(caller, call.newOwner).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::owner(_) => collection.owner().abi_encode().into(),
            IZombiezooCalls::setPreSaleRoot(call) => {
                collection.set_presale_root(caller, call.root).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::preSaleRoot(_) => collection.presale_root().abi_encode().into(),
            IZombiezooCalls::presaleMinted(call) => {
                U256::from(collection.presale_minted(call.account)).abi_encode().into()
            }
            IZombiezooCalls::mintTo(call) => {
                collection.mint_reserved(caller, call.to, call.tokenId).map_err(revert)?;
                Bytes::new()
            }
            IZombiezooCalls::mint(call) => {
                let request = PublicMint {
                    token_id: call.tokenId,
                    salt: call.salt,
                    signature: call.signature,
                    proof: call.proof,
                };
                let mut rail = EvmFundsRail { internals, source };
                let token_id =
                    collection.mint_public(caller, &request, value, &mut rail).map_err(revert)?;
                token_id.abi_encode().into()
            }
            IZombiezooCalls::finalized(call) => {
                collection.is_finalized(&call.fingerprint).abi_encode().into()
            }
            IZombiezooCalls::name(_) => collection.name().to_string().abi_encode().into(),
            IZombiezooCalls::symbol(_) => collection.symbol().to_string().abi_encode().into(),
            IZombiezooCalls::UNIT_PRICE(_) => collection.params().unit_price.abi_encode().into(),
            IZombiezooCalls::MAX_PRESALE_PER_MINTER(_) => {
                U256::from(collection.params().presale_cap).abi_encode().into()
            }
            IZombiezooCalls::totalSupply(_) => collection.total_supply().abi_encode().into(),
            IZombiezooCalls::fundRecipient(_) => collection.fund_recipient().abi_encode().into(),
            IZombiezooCalls::tokenURI(call) => {
                let uri = collection.token_uri(call.tokenId).map_err(|err| match err {
                    CollectionError::UnknownToken(_) => {
                        PrecompileError::Other(URI_QUERY_FOR_NONEXISTENT_TOKEN.to_string())
                    }
                    err => revert(err),
                })?;
                uri.abi_encode().into()
            }
            IZombiezooCalls::royaltyInfo(call) => {
                let info = collection.royalty_info(call.tokenId, call.salePrice);
                (info.receiver, info.amount).abi_encode_params().into()
            }
            IZombiezooCalls::ownerOf(call) => {
                collection.owner_of(call.tokenId).map_err(revert)?.abi_encode().into()
            }
            IZombiezooCalls::balanceOf(call) => {
                collection.balance_of(call.owner).map_err(revert)?.abi_encode().into()
            }
            IZombiezooCalls::supportsInterface(call) => {
                collection.supports_interface(call.interfaceId).abi_encode().into()
            }
        };
        Ok(output)
    }
}

impl Precompile for ZombiezooPrecompile {
    fn precompile_id(&self) -> &PrecompileId {
        Self::id()
    }

    fn call(&self, mut input: PrecompileInput<'_>) -> PrecompileResult {
        let caller: Address = input.caller;
        let value = input.value;
        let source = input.target_address;

        tracing::debug!(
            target: "zbz::precompile",
            ?caller,
            %value,
            calldata_len = input.data.len(),
            "precompile call invoked"
        );

        let decoded = match IZombiezooCalls::abi_decode(input.data) {
            Ok(v) => v,
            Err(e) => return Err(PrecompileError::Other(e.to_string())),
        };
        if !value.is_zero() && !matches!(decoded, IZombiezooCalls::mint(_)) {
            return Err(PrecompileError::Other(NON_PAYABLE.to_string()));
        }

        let internals = input.internals_mut();
        self.sync_revision(internals, caller)?;

        let before = self.collection.revision();
        let output = self.dispatch(decoded, caller, value, source, internals).inspect_err(|err| {
            tracing::debug!(target: "zbz::precompile", ?caller, %err, "call reverted");
        })?;

        let after = self.collection.revision();
        if after != before {
            if let Err(err) = Self::store_revision(internals, after) {
                // keep the collection in step with the slot that was not written
                let _ = self.collection.revert_to(before);
                return Err(err);
            }
        }
        Ok(PrecompileOutput::new(0, output))
    }

    fn is_pure(&self) -> bool {
        false
    }
}

/// Forwards mint payments held by the precompile account through the EVM journal.
struct EvmFundsRail<'a, 'b> {
    internals: &'a mut EvmInternals<'b>,
    source: Address,
}

impl EvmFundsRail<'_, '_> {
    fn transfer(&mut self, to: Address, amount: U256) -> Result<(), PrecompileError> {
        if amount.is_zero() || self.source == to {
            return Ok(());
        }
        ZombiezooPrecompile::ensure_account_created(self.internals, self.source)?;
        ZombiezooPrecompile::ensure_account_created(self.internals, to)?;

        let from_balance = self
            .internals
            .load_account(self.source)
            .map_err(ZombiezooPrecompile::map_internals_error)?
            .info
            .balance
            .checked_sub(amount)
            .ok_or_else(|| PrecompileError::Other("insufficient balance".to_string()))?;
        let to_balance = self
            .internals
            .load_account(to)
            .map_err(ZombiezooPrecompile::map_internals_error)?
            .info
            .balance
            .checked_add(amount)
            .ok_or_else(|| PrecompileError::Other("balance overflow".to_string()))?;

        self.internals
            .set_balance(self.source, from_balance)
            .map_err(ZombiezooPrecompile::map_internals_error)?;
        self.internals
            .set_balance(to, to_balance)
            .map_err(ZombiezooPrecompile::map_internals_error)?;

        self.internals.touch_account(self.source);
        self.internals.touch_account(to);
        Ok(())
    }
}

impl FundsRail for EvmFundsRail<'_, '_> {
    fn forward(&mut self, recipient: Address, amount: U256) -> Result<(), FundsError> {
        self.transfer(recipient, amount).map_err(|err| FundsError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revert::OWNER_QUERY_FOR_NONEXISTENT_TOKEN;
    use alloy::sol_types::SolCall;
    use alloy_primitives::{B256, FixedBytes};
    use alloy_signer::SignerSync;
    use alloy_signer_local::PrivateKeySigner;
    use revm::{
        context::{
            journal::{Journal, JournalInner},
            BlockEnv,
        },
        database::{CacheDB, EmptyDB},
        primitives::hardfork::SpecId,
    };
    use zbz_collection::{order_hash, MerkleTree};

    type TestJournal = Journal<CacheDB<EmptyDB>>;

    const GAS_LIMIT: u64 = 1_000_000;
    const RECIPIENT: Address = address!("0x00000000000000000000000000000000000000aa");
    const MINTER: Address = address!("0x00000000000000000000000000000000000000b1");

    fn setup_context() -> (TestJournal, BlockEnv) {
        let mut journal = Journal::new_with_inner(CacheDB::default(), JournalInner::new());
        journal.inner.set_spec_id(SpecId::PRAGUE);
        let block_env = BlockEnv::default();
        (journal, block_env)
    }

    fn run_call(
        journal: &mut TestJournal,
        block_env: &BlockEnv,
        precompile: &ZombiezooPrecompile,
        caller: Address,
        value: U256,
        data: &[u8],
    ) -> PrecompileResult {
        let input = PrecompileInput {
            data,
            gas: GAS_LIMIT,
            caller,
            value,
            target_address: ZOMBIEZOO_PRECOMPILE_ADDR,
            bytecode_address: ZOMBIEZOO_PRECOMPILE_ADDR,
            internals: EvmInternals::new(journal, block_env),
        };

        precompile.call(input)
    }

    fn account_balance(journal: &TestJournal, address: Address) -> Option<U256> {
        journal.inner.state.get(&address).map(|account| account.info.balance)
    }

    /// Credits the precompile with the call value, as the EVM does before running it.
    fn deposit(journal: &mut TestJournal, amount: U256) {
        journal.inner.state.entry(ZOMBIEZOO_PRECOMPILE_ADDR).or_default().info.balance = amount;
    }

    fn stored_revision(journal: &TestJournal) -> Option<U256> {
        journal
            .inner
            .state
            .get(&ZOMBIEZOO_PRECOMPILE_ADDR)
            .and_then(|account| account.storage.get(&REVISION_SLOT))
            .map(|slot| slot.present_value)
    }

    fn expect_revert(result: PrecompileResult, reason: &str) {
        match result {
            Err(PrecompileError::Other(msg)) => {
                assert!(msg.starts_with(reason), "expected {reason:?}, got {msg:?}")
            }
            other => panic!("expected revert {reason:?}, got {other:?}"),
        }
    }

    struct Deployment {
        admin: PrivateKeySigner,
        precompile: ZombiezooPrecompile,
        journal: TestJournal,
        block_env: BlockEnv,
    }

    impl Deployment {
        fn activated() -> Self {
            let admin = PrivateKeySigner::random();
            let precompile = ZombiezooPrecompile::deploy(admin.address());
            let (journal, block_env) = setup_context();
            let mut deployment = Self { admin, precompile, journal, block_env };
            let calldata = IZombiezoo::activateCall {
                startIndex: U256::from(80),
                totalSupply: U256::from(90),
                baseURI: "https://nft.uri/".to_string(),
                fundRecipient: RECIPIENT,
            }
            .abi_encode();
            deployment.call(deployment.admin.address(), U256::ZERO, &calldata).expect("activate");
            deployment
        }

        fn call(&mut self, caller: Address, value: U256, data: &[u8]) -> PrecompileResult {
            run_call(&mut self.journal, &self.block_env, &self.precompile, caller, value, data)
        }

        fn mint_calldata(
            &self,
            minter: Address,
            token_id: u64,
            salt: u64,
            proof: Vec<B256>,
        ) -> Vec<u8> {
            let salt = U256::from(salt);
            let fingerprint = order_hash(minter, salt);
            let signature = self.admin.sign_message_sync(fingerprint.as_slice()).unwrap();
            IZombiezoo::mintCall {
                tokenId: U256::from(token_id),
                salt,
                signature: Bytes::from(signature.as_bytes().to_vec()),
                proof,
            }
            .abi_encode()
        }

        fn price(&self) -> U256 {
            self.precompile.collection().params().unit_price
        }

        fn paid_mint(&mut self, minter: Address, calldata: &[u8]) -> PrecompileResult {
            let price = self.price();
            deposit(&mut self.journal, price);
            self.call(minter, price, calldata)
        }
    }

    #[test]
    fn mint_forwards_payment_and_issues_token() {
        let mut d = Deployment::activated();
        let calldata = d.mint_calldata(MINTER, 81, 1, Vec::new());

        let output = d.paid_mint(MINTER, &calldata).expect("mint should succeed");
        assert_eq!(U256::abi_decode(&output.bytes).unwrap(), U256::from(81));
        assert_eq!(account_balance(&d.journal, RECIPIENT), Some(d.price()));
        assert_eq!(account_balance(&d.journal, ZOMBIEZOO_PRECOMPILE_ADDR), Some(U256::ZERO));
        assert!(d.journal.inner.state.get(&RECIPIENT).unwrap().is_touched());

        let owner_of = IZombiezoo::ownerOfCall { tokenId: U256::from(81) }.abi_encode();
        let output = d.call(MINTER, U256::ZERO, &owner_of).unwrap();
        assert_eq!(Address::abi_decode(&output.bytes).unwrap(), MINTER);

        let uri = IZombiezoo::tokenURICall { tokenId: U256::from(81) }.abi_encode();
        let output = d.call(MINTER, U256::ZERO, &uri).unwrap();
        assert_eq!(String::abi_decode(&output.bytes).unwrap(), "https://nft.uri/81");

        expect_revert(d.paid_mint(MINTER, &calldata), "ZBZ: Salt used");
    }

    #[test]
    fn underfunded_precompile_rolls_back_mint() {
        let mut d = Deployment::activated();
        let calldata = d.mint_calldata(MINTER, 81, 1, Vec::new());

        // value claimed but never credited to the precompile account
        let price = d.price();
        expect_revert(d.call(MINTER, price, &calldata), "ZBZ: Transfer failed");
        assert!(!d.precompile.collection().is_finalized(&order_hash(MINTER, U256::from(1))));
        assert_eq!(d.precompile.collection().current_public_cursor(), Ok(U256::from(81)));

        d.paid_mint(MINTER, &calldata).expect("retry with the same salt succeeds");
    }

    #[test]
    fn mint_validation_reverts_with_contract_reasons() {
        let mut d = Deployment::activated();

        let reserved = d.mint_calldata(MINTER, 1, 1, Vec::new());
        expect_revert(
            d.paid_mint(MINTER, &reserved),
            "ZBZ: Invalid tokenID, this tokenID is reserved",
        );

        let far_ahead = d.mint_calldata(MINTER, 5000, 3, Vec::new());
        expect_revert(d.paid_mint(MINTER, &far_ahead), "ZBZ: Invalid tokenId");

        let cheap = d.mint_calldata(MINTER, 81, 2, Vec::new());
        deposit(&mut d.journal, U256::from(1));
        expect_revert(d.call(MINTER, U256::from(1), &cheap), "ZBZ: Invalid amount");

        for (salt, id) in (10..20).zip(81..=90) {
            let calldata = d.mint_calldata(MINTER, id, salt, Vec::new());
            d.paid_mint(MINTER, &calldata).expect("mint within supply");
        }
        let beyond = d.mint_calldata(MINTER, 91, 99, Vec::new());
        expect_revert(d.paid_mint(MINTER, &beyond), "ZBZ: This tokenID does not exits");
    }

    #[test]
    fn presale_proofs_are_checked() {
        let mut d = Deployment::activated();
        let others = [address!("0x00000000000000000000000000000000000000c2"), MINTER];
        let tree = MerkleTree::from_addresses(&others);
        let set_root = IZombiezoo::setPreSaleRootCall { root: tree.root() }.abi_encode();
        d.call(d.admin.address(), U256::ZERO, &set_root).unwrap();

        let empty = d.mint_calldata(MINTER, 81, 1, Vec::new());
        expect_revert(d.paid_mint(MINTER, &empty), "ZBZ: Can not mint");

        let proof = tree.proof_for(MINTER).unwrap();
        for (salt, id) in [(2, 81), (3, 82)] {
            let calldata = d.mint_calldata(MINTER, id, salt, proof.clone());
            d.paid_mint(MINTER, &calldata).expect("presale mint within cap");
        }
        let third = d.mint_calldata(MINTER, 83, 4, proof);
        expect_revert(d.paid_mint(MINTER, &third), "ZBZ: Can not mint");
    }

    #[test]
    fn admin_and_owner_calls_are_gated() {
        let mut d = Deployment::activated();
        let stranger = address!("0x00000000000000000000000000000000000000ff");

        let set_verifier = IZombiezoo::setVerifierCall { verifier: stranger }.abi_encode();
        expect_revert(d.call(stranger, U256::ZERO, &set_verifier), "AccessControl:");

        let transfer = IZombiezoo::transferOwnershipCall { newOwner: stranger }.abi_encode();
        expect_revert(d.call(stranger, U256::ZERO, &transfer), "Ownable:");

        let activate = IZombiezoo::activateCall {
            startIndex: U256::from(50),
            totalSupply: U256::from(1000),
            baseURI: "https://nft1.uri/".to_string(),
            fundRecipient: RECIPIENT,
        }
        .abi_encode();
        expect_revert(d.call(d.admin.address(), U256::ZERO, &activate), "ZBZ: Already activated");

        let mint_to = IZombiezoo::mintToCall { to: stranger, tokenId: U256::from(1) }.abi_encode();
        d.call(d.admin.address(), U256::ZERO, &mint_to).unwrap();
        expect_revert(
            d.call(d.admin.address(), U256::ZERO, &mint_to),
            "ERC721: token already minted",
        );

        let zero = IZombiezoo::mintToCall { to: stranger, tokenId: U256::ZERO }.abi_encode();
        expect_revert(d.call(d.admin.address(), U256::ZERO, &zero), "ZBZ: Invalid tokenId");
        let public = IZombiezoo::mintToCall { to: stranger, tokenId: U256::from(81) }.abi_encode();
        expect_revert(
            d.call(d.admin.address(), U256::ZERO, &public),
            "ZBZ: Invalid tokenId, must be index for reserving",
        );
    }

    #[test]
    fn queries_return_abi_encoded_values() {
        let mut d = Deployment::activated();
        let caller = MINTER;

        let output = d.call(caller, U256::ZERO, &IZombiezoo::nameCall {}.abi_encode()).unwrap();
        assert_eq!(String::abi_decode(&output.bytes).unwrap(), "Zombiezoo");
        let unit_price = IZombiezoo::UNIT_PRICECall {}.abi_encode();
        let output = d.call(caller, U256::ZERO, &unit_price).unwrap();
        assert_eq!(
            U256::abi_decode(&output.bytes).unwrap(),
            U256::from(800_000_000_000_000_000u64)
        );
        let cap = IZombiezoo::MAX_PRESALE_PER_MINTERCall {}.abi_encode();
        let output = d.call(caller, U256::ZERO, &cap).unwrap();
        assert_eq!(U256::abi_decode(&output.bytes).unwrap(), U256::from(2));

        let royalty =
            IZombiezoo::royaltyInfoCall { tokenId: U256::from(81), salePrice: U256::from(10_000) }
                .abi_encode();
        let output = d.call(caller, U256::ZERO, &royalty).unwrap();
        let (receiver, amount) = <(Address, U256)>::abi_decode_params(&output.bytes).unwrap();
        assert_eq!((receiver, amount), (RECIPIENT, U256::from(1_000)));

        let erc2981 = FixedBytes::from([0x2a, 0x55, 0x20, 0x5a]);
        let supports = IZombiezoo::supportsInterfaceCall { interfaceId: erc2981 }.abi_encode();
        let output = d.call(caller, U256::ZERO, &supports).unwrap();
        assert!(bool::abi_decode(&output.bytes).unwrap());

        let uri = IZombiezoo::tokenURICall { tokenId: U256::from(81) }.abi_encode();
        expect_revert(d.call(caller, U256::ZERO, &uri), "ERC721Metadata:");
    }

    #[test]
    fn reverted_frame_discards_mint() {
        let mut d = Deployment::activated();
        let calldata = d.mint_calldata(MINTER, 81, 1, Vec::new());
        let fingerprint = order_hash(MINTER, U256::from(1));
        assert_eq!(stored_revision(&d.journal), Some(U256::from(1)));

        let checkpoint = d.journal.inner.checkpoint();
        d.paid_mint(MINTER, &calldata).expect("mint inside the frame succeeds");
        assert_eq!(stored_revision(&d.journal), Some(U256::from(2)));
        d.journal.inner.checkpoint_revert(checkpoint);

        assert_eq!(stored_revision(&d.journal), Some(U256::from(1)));
        assert_eq!(account_balance(&d.journal, RECIPIENT).unwrap_or_default(), U256::ZERO);

        let owner_of = IZombiezoo::ownerOfCall { tokenId: U256::from(81) }.abi_encode();
        expect_revert(d.call(MINTER, U256::ZERO, &owner_of), OWNER_QUERY_FOR_NONEXISTENT_TOKEN);
        let collection = d.precompile.collection();
        assert!(!collection.is_finalized(&fingerprint));
        assert_eq!(collection.current_public_cursor(), Ok(U256::from(81)));
        assert_eq!(collection.revision(), 1);

        let output = d.paid_mint(MINTER, &calldata).expect("salt is usable again");
        assert_eq!(U256::abi_decode(&output.bytes).unwrap(), U256::from(81));
        assert_eq!(account_balance(&d.journal, RECIPIENT), Some(d.price()));
    }

    #[test]
    fn reverted_frame_discards_admin_changes() {
        let mut d = Deployment::activated();
        let admin = d.admin.address();
        let stranger = address!("0x00000000000000000000000000000000000000ff");

        let checkpoint = d.journal.inner.checkpoint();
        let set_verifier = IZombiezoo::setVerifierCall { verifier: stranger }.abi_encode();
        d.call(admin, U256::ZERO, &set_verifier).unwrap();
        let transfer = IZombiezoo::transferOwnershipCall { newOwner: stranger }.abi_encode();
        d.call(admin, U256::ZERO, &transfer).unwrap();
        d.journal.inner.checkpoint_revert(checkpoint);

        let is_verifier = IZombiezoo::isVerifierCall { account: stranger }.abi_encode();
        let output = d.call(admin, U256::ZERO, &is_verifier).unwrap();
        assert!(!bool::abi_decode(&output.bytes).unwrap());
        let owner = IZombiezoo::ownerCall {}.abi_encode();
        let output = d.call(admin, U256::ZERO, &owner).unwrap();
        assert_eq!(Address::abi_decode(&output.bytes).unwrap(), admin);
    }

    #[test]
    fn revision_slot_ahead_of_collection_is_rejected() {
        let mut d = Deployment::activated();
        d.precompile = ZombiezooPrecompile::deploy(d.admin.address());

        let owner = IZombiezoo::ownerCall {}.abi_encode();
        expect_revert(d.call(MINTER, U256::ZERO, &owner), "ZBZ: State out of sync");
        assert_eq!(stored_revision(&d.journal), Some(U256::from(1)));
    }

    #[test]
    fn value_on_non_payable_call_is_rejected() {
        let mut d = Deployment::activated();
        let owner = IZombiezoo::ownerCall {}.abi_encode();
        expect_revert(d.call(MINTER, U256::from(1), &owner), NON_PAYABLE);
    }
}
