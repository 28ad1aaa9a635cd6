use super::types::{Address, Hash, U256};
use super::*;
use serde::Serialize;
use hex::FromHex;

fn addr(s: &str) -> Address {
    Address(<[u8; 20]>::from_hex(s).unwrap())
}

#[test]
fn empty_payload_hashes_to_keccak_of_nothing() {
    // keccak256("")
    let expected = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
    assert_eq!(to_hash(&()).unwrap(), Hash(<[u8; 32]>::from_hex(expected).unwrap()));
}

#[test]
fn address_is_not_padded() {
    // Random address from etherscan, do not use!
    let a = addr("95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5");
    assert_eq!(to_vec(&a).unwrap(), a.0.to_vec());
}

#[test]
fn address_and_uint256() {
    /*
    ```js
    abi.solidityPack(["address", "uint256"], [addr, 0x0102])
    ```
    */
    #[derive(Serialize)]
    struct Payload {
        a: Address,
        v: U256,
    }
    let d = Payload {
        a: addr("95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5"),
        v: U256::from(0x0102),
    };

    let expected = hex::decode(concat!(
        "95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
        "0000000000000000000000000000000000000000000000000000000000000102",
    ))
    .unwrap();
    assert_eq!(to_vec(&d).unwrap(), expected);
}

#[test]
fn integers_use_natural_width() {
    let d = (true, 0x01u8, 0x0203u16, 0x04050607u32, 0x08u64);
    let expected = hex::decode("01010203040506070000000000000008").unwrap();
    assert_eq!(to_vec(&d).unwrap(), expected);
}

#[test]
fn string_then_bytes32() {
    let h = Hash([0xab; 32]);
    let mut expected = b"\x19Ethereum Signed Message:\n32".to_vec();
    expected.extend_from_slice(&[0xab; 32]);
    assert_eq!(
        to_vec(&("\x19Ethereum Signed Message:\n32", h)).unwrap(),
        expected
    );
}

#[test]
fn newtype_is_transparent() {
    #[derive(Serialize)]
    struct Amount(U256);
    assert_eq!(
        to_vec(&Amount(U256::from(7))).unwrap(),
        U256::from(7).to_be_bytes().to_vec()
    );
}

#[test]
fn unrepresentable_types_are_rejected() {
    assert_eq!(to_vec(&1.5f64), Err(Error::TypeNotRepresentable("f64")));
    assert_eq!(
        to_vec(&Some(1u8)),
        Err(Error::TypeNotRepresentable("Option"))
    );
    assert_eq!(
        to_vec(&vec![1u8, 2, 3]),
        Err(Error::TypeNotYetSupported("sequence"))
    );

    #[derive(Serialize)]
    enum Kind {
        A,
    }
    assert_eq!(to_vec(&Kind::A), Err(Error::TypeNotRepresentable("enum")));
}

#[test]
fn displayed_values_are_rejected() {
    struct Displayed;
    impl Serialize for Displayed {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            serializer.collect_str(&format_args!("{}", 42))
        }
    }

    assert_eq!(
        to_vec(&Displayed),
        Err(Error::TypeNotYetSupported("collect_str"))
    );
}

#[test]
fn hashing_matches_buffered_encoding() {
    use sha3::{Digest, Keccak256};

    let d = (addr("95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5"), U256::MAX);
    let buffered: [u8; 32] = Keccak256::digest(to_vec(&d).unwrap()).into();
    assert_eq!(to_hash(&d).unwrap(), Hash(buffered));
}
