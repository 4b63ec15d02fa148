// Copyright (c) 2019 Basex Developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.

//! Masternode signer
//!
//! Signs and verifies masternode messages, and checks that an input spends
//! a collateral output owned by a claimed key.
//!

use std::error;
use std::fmt;
use std::sync::RwLock;

use secp256k1::{All, Secp256k1};

use crate::blockdata::script::Script;
use crate::blockdata::transaction::{Transaction, TxIn};
use crate::hash_types::{BlockHash, Txid};
use crate::masternode::collateral::{self, CollateralScheduler, SporkValues};
use crate::network::constants::Network;
use crate::util::address::{self, Address};
use crate::util::amount::Amount;
use crate::util::key::{self, PrivateKey, PublicKey};
use crate::util::signature::{self, signed_msg_hash, MessageSignature};

/// Transaction lookup by id.
pub trait ChainQuery {
    /// The transaction and the hash of the block containing it.
    fn get_transaction(&self, txid: &Txid) -> Option<(Transaction, BlockHash)>;
}

/// Height lookup for known blocks.
pub trait BlockIndex {
    /// Height of the block, if it is in the index.
    fn height_of(&self, hash: &BlockHash) -> Option<u32>;
}

/// Signer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The produced signature does not recover to the signing key
    SigningFailure,
    /// No public key could be recovered from the signature
    RecoveryFailure(signature::Error),
    /// The secret does not decode to a key of the signer's network
    InvalidPrivateKey(key::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::SigningFailure => f.write_str("signing failed"),
            Error::RecoveryFailure(ref e) => write!(f, "error recovering public key: {}", e),
            Error::InvalidPrivateKey(ref e) => write!(f, "invalid private key: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::SigningFailure => None,
            Error::RecoveryFailure(ref e) => Some(e),
            Error::InvalidPrivateKey(ref e) => Some(e),
        }
    }
}

#[doc(hidden)]
impl From<signature::Error> for Error {
    fn from(e: signature::Error) -> Error {
        Error::RecoveryFailure(e)
    }
}

#[doc(hidden)]
impl From<key::Error> for Error {
    fn from(e: key::Error) -> Error {
        Error::InvalidPrivateKey(e)
    }
}

/// Message signing and collateral checks for one network.
pub struct MasternodeSigner {
    network: Network,
    secp: Secp256k1<All>,
    collateral_destination: RwLock<Option<Script>>,
}

impl fmt::Debug for MasternodeSigner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MasternodeSigner")
            .field("network", &self.network)
            .field("collateral_destination", &self.collateral_destination())
            .finish()
    }
}

impl MasternodeSigner {
    /// A signer using `network`'s address and key prefixes.
    pub fn new(network: Network) -> MasternodeSigner {
        MasternodeSigner {
            network,
            secp: Secp256k1::new(),
            collateral_destination: RwLock::new(None),
        }
    }

    /// The network whose prefixes this signer uses.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Signs `message` under the signed-message magic.
    pub fn sign(&self, message: &str, key: &PrivateKey) -> Result<MessageSignature, Error> {
        let hash = signed_msg_hash(message);
        let sig = MessageSignature::sign(&self.secp, &hash, key);
        match sig.recover_pubkey(&self.secp, &hash) {
            Ok(pk) if pk == key.public_key(&self.secp) => Ok(sig),
            _ => Err(Error::SigningFailure),
        }
    }

    /// Checks that `sig` over `message` was made by `expected`. Keys are
    /// compared by the hash of their serialization, so a signature made
    /// with the other compression of the same key does not match.
    pub fn verify(&self, message: &str, sig: &[u8], expected: &PublicKey) -> Result<bool, Error> {
        let hash = signed_msg_hash(message);
        let recovered = match MessageSignature::from_slice(sig).and_then(|s| s.recover_pubkey(&self.secp, &hash)) {
            Ok(pk) => pk,
            Err(e) => {
                warn!("Error recovering public key: {}", e);
                return Err(Error::RecoveryFailure(e));
            }
        };

        if recovered.pubkey_hash() != expected.pubkey_hash() {
            debug!(
                "Keys don't match: pubkey={}, recovered={}, message={}",
                expected, recovered, message
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Whether `input` spends an output paying the collateral due at the
    /// height of its block to the P2PKH script of `claimed`. A block
    /// missing from the index requires the first tier.
    pub fn verify_input_collateral<C, S>(
        &self,
        input: &TxIn,
        claimed: &PublicKey,
        chain: &C,
        collateral: &CollateralScheduler<S>,
    ) -> bool
    where
        C: ChainQuery + BlockIndex + ?Sized,
        S: SporkValues,
    {
        let txid = input.previous_output.txid;
        let (tx, block_hash) = match chain.get_transaction(&txid) {
            Some(found) => found,
            None => {
                debug!("Collateral transaction {} not found", txid);
                return false;
            }
        };

        let required = match chain.height_of(&block_hash) {
            Some(height) => collateral.resolve(height),
            None => collateral::first_tier_amount(),
        };
        let payee = Script::new_p2pkh(&claimed.pubkey_hash());

        let found = tx
            .output
            .iter()
            .any(|out| out.amount() == required && out.script_pubkey == payee);
        if !found {
            debug!("No output of {} to {} in collateral transaction {}", required, claimed, txid);
        }
        found
    }

    /// Sets the script collateral is paid to from an address of the
    /// signer's network.
    pub fn set_collateral_destination(&self, address: &str) -> Result<(), address::Error> {
        let address = match Address::from_str_with_network(address, self.network) {
            Ok(address) => address,
            Err(e) => {
                warn!("Invalid collateral address {}: {}", address, e);
                return Err(e);
            }
        };
        let mut destination = match self.collateral_destination.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *destination = Some(address.script_pubkey());
        Ok(())
    }

    /// The collateral script, once set.
    pub fn collateral_destination(&self) -> Option<Script> {
        match self.collateral_destination.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Decodes a WIF secret of the signer's network into its key pair.
    pub fn keys_from_secret(&self, wif: &str) -> Result<(PrivateKey, PublicKey), Error> {
        let sk = PrivateKey::from_wif_for(wif, self.network)?;
        let pk = sk.public_key(&self.secp);
        Ok((sk, pk))
    }

    /// Whether `amount` is one of the collateral tier amounts.
    pub fn is_collateral_amount(amount: Amount) -> bool {
        collateral::is_tier_amount(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockdata::transaction::{OutPoint, TxOut};
    use crate::test_helpers::{decode_sk, MockChain, MockSporks};

    const SECRET: &str = "0101010101010101010101010101010101010101010101010101010101010101";
    const MAIN_WIF: &str = "5tAm49Tyay8Ns1guivP2mp2drF3TNmKCpYcQBWng4wd6wHoxtiNd";

    fn key() -> PrivateKey {
        PrivateKey::new(decode_sk(SECRET), Network::Main)
    }

    fn other_key() -> PrivateKey {
        PrivateKey::new(
            decode_sk("0202020202020202020202020202020202020202020202020202020202020202"),
            Network::Main,
        )
    }

    fn sporks() -> MockSporks {
        MockSporks::from_fn(|i| 1000 * (i as i64 + 1))
    }

    fn collateral_tx(coins: u64, payee: &PublicKey) -> Transaction {
        Transaction {
            version: 1,
            input: vec![TxIn::default()],
            output: vec![
                TxOut {
                    value: 12_345,
                    script_pubkey: Script::new(),
                },
                TxOut {
                    value: Amount::from_coins(coins).as_sat(),
                    script_pubkey: Script::new_p2pkh(&payee.pubkey_hash()),
                },
            ],
            lock_time: 0,
        }
    }

    fn spending(tx: &Transaction) -> TxIn {
        TxIn {
            previous_output: OutPoint::new(tx.txid(), 1),
            ..TxIn::default()
        }
    }

    #[test]
    fn sign_then_verify() {
        let signer = MasternodeSigner::new(Network::Main);
        let sk = key();
        let pk = sk.public_key(&signer.secp);
        let sig = signer.sign("ping 1545291737", &sk).unwrap().serialize();

        assert_eq!(signer.verify("ping 1545291737", &sig, &pk), Ok(true));
        assert_eq!(signer.verify("ping 1545291738", &sig, &pk), Ok(false));

        let other = other_key().public_key(&signer.secp);
        assert_eq!(signer.verify("ping 1545291737", &sig, &other), Ok(false));
    }

    #[test]
    fn verify_compares_serialized_identity() {
        let signer = MasternodeSigner::new(Network::Main);
        let sk = key();
        let uncompressed = PrivateKey { compressed: false, ..sk };
        let sig = signer.sign("hello", &uncompressed).unwrap().serialize();

        assert_eq!(signer.verify("hello", &sig, &uncompressed.public_key(&signer.secp)), Ok(true));
        assert_eq!(signer.verify("hello", &sig, &sk.public_key(&signer.secp)), Ok(false));
    }

    #[test]
    fn unrecoverable_signatures() {
        let signer = MasternodeSigner::new(Network::Main);
        let pk = key().public_key(&signer.secp);

        match signer.verify("hello", &[0u8; 10], &pk) {
            Err(Error::RecoveryFailure(signature::Error::InvalidLength(10))) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mut sig = signer.sign("hello", &key()).unwrap().serialize();
        sig[0] = 0;
        assert!(matches!(signer.verify("hello", &sig, &pk), Err(Error::RecoveryFailure(_))));

        // r = 0 is never a valid signature.
        let mut zero = [0u8; 65];
        zero[0] = 31;
        assert!(matches!(signer.verify("hello", &zero, &pk), Err(Error::RecoveryFailure(_))));
    }

    #[test]
    fn collateral_at_block_height() {
        let signer = MasternodeSigner::new(Network::Main);
        let pk = key().public_key(&signer.secp);
        let sporks = sporks();
        let scheduler = CollateralScheduler::new(&sporks);

        let tx = collateral_tx(4300, &pk);
        let block = BlockHash::default();
        let mut chain = MockChain::default();
        chain.add_transaction(tx.clone(), block);

        chain.insert(block, 1500);
        assert!(signer.verify_input_collateral(&spending(&tx), &pk, &chain, &scheduler));

        chain.insert(block, 500);
        assert!(!signer.verify_input_collateral(&spending(&tx), &pk, &chain, &scheduler));

        let other = other_key().public_key(&signer.secp);
        chain.insert(block, 1500);
        assert!(!signer.verify_input_collateral(&spending(&tx), &other, &chain, &scheduler));
    }

    #[test]
    fn collateral_unknown_transaction_or_block() {
        let signer = MasternodeSigner::new(Network::Main);
        let pk = key().public_key(&signer.secp);
        let sporks = sporks();
        let scheduler = CollateralScheduler::new(&sporks);

        let tx = collateral_tx(3500, &pk);
        let mut chain = MockChain::default();
        assert!(!signer.verify_input_collateral(&spending(&tx), &pk, &chain, &scheduler));

        // Block not indexed: the first tier applies.
        chain.add_transaction(tx.clone(), BlockHash::default());
        assert!(signer.verify_input_collateral(&spending(&tx), &pk, &chain, &scheduler));

        let tx = collateral_tx(4300, &pk);
        chain.add_transaction(tx.clone(), BlockHash::default());
        assert!(!signer.verify_input_collateral(&spending(&tx), &pk, &chain, &scheduler));
    }

    #[test]
    fn collateral_destination() {
        let signer = MasternodeSigner::new(Network::Main);
        assert_eq!(signer.collateral_destination(), None);

        let pk = key().public_key(&signer.secp);
        let address = Address::p2pkh(&pk, Network::Main).to_string();
        signer.set_collateral_destination(&address).unwrap();
        assert_eq!(signer.collateral_destination(), Some(Script::new_p2pkh(&pk.pubkey_hash())));

        let test_address = Address::p2pkh(&pk, Network::Test).to_string();
        assert!(signer.set_collateral_destination(&test_address).is_err());
        assert!(signer.set_collateral_destination("not an address").is_err());
        assert_eq!(signer.collateral_destination(), Some(Script::new_p2pkh(&pk.pubkey_hash())));
    }

    #[test]
    fn keys_from_secret() {
        let signer = MasternodeSigner::new(Network::Main);
        let (sk, pk) = signer.keys_from_secret(MAIN_WIF).unwrap();
        assert_eq!(sk, key());
        assert_eq!(pk, key().public_key(&signer.secp));

        let test_signer = MasternodeSigner::new(Network::Test);
        assert_eq!(test_signer.network(), Network::Test);
        assert_eq!(
            test_signer.keys_from_secret(MAIN_WIF).unwrap_err(),
            Error::InvalidPrivateKey(key::Error::InvalidVersion(33))
        );
        assert!(signer.keys_from_secret("garbage").is_err());
    }

    #[test]
    fn collateral_amounts() {
        assert!(MasternodeSigner::is_collateral_amount(Amount::from_coins(3500)));
        assert!(MasternodeSigner::is_collateral_amount(Amount::from_coins(9500)));
        assert!(!MasternodeSigner::is_collateral_amount(Amount::from_coins(6650)));
    }
}
