//! A module to simplify ABI encoding
//!
//! For simplicity, it is based on tokens. You have to specify a list of
//! tokens and they will be automatically encoded.
//!
//! Additionally there are helpers to derive function selectors and to read
//! single words out of a call result.
//!
//! This is not a full fledged implementation of an ABI encoder, only static
//! types are supported since every router and pool function the adapter
//! calls takes and returns static values.
use crate::address::{Address, ADDRESS_LENGTH};
use crate::Error;
use num256::Uint256;
use sha3::{Digest, Keccak256};

/// Length of a single ABI word in bytes
pub const WORD_LENGTH: usize = 32;

/// A token represents a value of parameter of the contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiToken {
    /// Unsigned integer, always encoded as a full word
    Uint(Uint256),
    Address(Address),
}

impl AbiToken {
    /// Serializes the token into a single left padded word
    fn serialize(&self) -> [u8; WORD_LENGTH] {
        let mut res = [0u8; WORD_LENGTH];
        match self {
            AbiToken::Uint(value) => res = value.to_be_bytes(),
            AbiToken::Address(address) => {
                res[WORD_LENGTH - ADDRESS_LENGTH..].copy_from_slice(address.as_bytes())
            }
        }
        res
    }

    /// Returns true if this token can be passed for the given solidity type
    fn matches_type(&self, solidity_type: &str) -> bool {
        match self {
            AbiToken::Uint(_) => {
                solidity_type == "uint"
                    || solidity_type
                        .strip_prefix("uint")
                        .and_then(|bits| bits.parse::<u16>().ok())
                        .map(|bits| bits > 0 && bits <= 256 && bits % 8 == 0)
                        .unwrap_or(false)
            }
            AbiToken::Address(_) => solidity_type == "address",
        }
    }
}

impl From<Uint256> for AbiToken {
    fn from(v: Uint256) -> AbiToken {
        AbiToken::Uint(v)
    }
}

impl From<Address> for AbiToken {
    fn from(v: Address) -> AbiToken {
        AbiToken::Address(v)
    }
}

/// Given a signature it derives a Method ID
pub fn derive_method_id(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut result: [u8; 4] = Default::default();
    result.copy_from_slice(&digest[0..4]);
    result
}

/// Splits `name(type1,type2)` into its argument types, rejecting anything
/// that is not a well formed signature
fn signature_types(signature: &str) -> Result<Vec<&str>, Error> {
    let open = signature.find('(');
    let (open, args) = match (open, signature.strip_suffix(')')) {
        (Some(open), Some(stripped)) if open > 0 => (open, &stripped[open + 1..]),
        _ => {
            return Err(Error::InvalidCallError(format!(
                "Malformed signature {signature}"
            )))
        }
    };
    if args.contains('(') || args.contains(')') || signature[..open].contains(' ') {
        return Err(Error::InvalidCallError(format!(
            "Unsupported signature {signature}"
        )));
    }
    if args.is_empty() {
        return Ok(Vec::new());
    }
    Ok(args.split(',').collect())
}

/// This one is a very simplified ABI encoder that takes a bunch of tokens,
/// and serializes them.
pub fn encode_tokens(tokens: &[AbiToken]) -> Vec<u8> {
    let mut res = Vec::with_capacity(tokens.len() * WORD_LENGTH);
    for token in tokens.iter() {
        res.extend_from_slice(&token.serialize());
    }
    res
}

/// Encodes a full contract call, the method id derived from `sig` followed by
/// the encoded `tokens`. The tokens are checked against the types named in
/// the signature so a mismatched call fails here instead of reverting on chain.
pub fn encode_call(sig: &str, tokens: &[AbiToken]) -> Result<Vec<u8>, Error> {
    let types = signature_types(sig)?;
    if types.len() != tokens.len() {
        return Err(Error::InvalidCallError(format!(
            "{sig} takes {} arguments, {} were provided",
            types.len(),
            tokens.len()
        )));
    }
    for (position, (solidity_type, token)) in types.iter().zip(tokens.iter()).enumerate() {
        if !token.matches_type(solidity_type) {
            return Err(Error::InvalidCallError(format!(
                "{sig} argument {position} is {solidity_type}, got {token:?}"
            )));
        }
    }

    let mut wtr = derive_method_id(sig).to_vec();
    wtr.extend(encode_tokens(tokens));
    Ok(wtr)
}

/// Returns the word at `index` from an ABI encoded result
pub fn get_word(data: &[u8], index: usize) -> Result<&[u8], Error> {
    let start = index * WORD_LENGTH;
    data.get(start..start + WORD_LENGTH)
        .ok_or(Error::InvalidAbiWord {
            got: data.len().saturating_sub(start),
        })
}

/// Decodes an address returned as a single left padded word
pub fn decode_address(word: &[u8]) -> Result<Address, Error> {
    if word.len() != WORD_LENGTH {
        return Err(Error::InvalidAbiWord { got: word.len() });
    }
    Address::from_slice(&word[WORD_LENGTH - ADDRESS_LENGTH..])
}
