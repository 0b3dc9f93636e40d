//! HMAC (FIPS 198-1, RFC 2104) over the SHA-2 engine.
//!
//! Both passes reuse the plain digest path: the xored key block is handed to
//! the block assembler as an injected first block, so the message itself is
//! streamed exactly as it would be for a plain digest.

use tracing::debug;

use crate::digest::chunked::{BlockAssembler, MAX_BLOCK_LEN};
use crate::digest::format::{self, Digest};
use crate::digest::hash_source;
use crate::digest::sha2::hash_state;
use crate::digest::stream::{Source, StreamState};
use crate::digest::variant::Params;
use crate::digest::word::Word;
use crate::error::DigestError;
use crate::options::DigestOptions;
use crate::utils::slice_ext::SliceExt;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

pub(crate) fn hmac<W: Word>(
    params: &Params<W>,
    message: &Source<'_>,
    key: &Source<'_>,
    options: &DigestOptions,
) -> Result<Digest, DigestError> {
    let block_len = params.variant.block_len();
    let key_block = derive_key(params, key, options)?;

    let mut inner_pad = key_block;
    inner_pad[..block_len].xor_each(IPAD);
    let mut outer_pad = key_block;
    outer_pad[..block_len].xor_each(OPAD);

    let inner = hash_source(params, message, Some(&inner_pad[..block_len]), options.read_ahead)?;
    let inner = format::raw(&inner, params.truncation);

    let outer = hash_source(
        params,
        &Source::Memory(inner.as_ref()),
        Some(&outer_pad[..block_len]),
        options.read_ahead,
    )?;
    Ok(format::render(&outer, params.truncation, options.output))
}

/// Produces the key zero-padded to one block. Keys longer than a block are
/// replaced by their digest. Every failure is reported as a key failure.
fn derive_key<W: Word>(
    params: &Params<W>,
    key: &Source<'_>,
    options: &DigestOptions,
) -> Result<[u8; MAX_BLOCK_LEN], DigestError> {
    let stream = StreamState::open(key, options.read_ahead).map_err(DigestError::into_key_error)?;
    load_key(params, stream).map_err(DigestError::into_key_error)
}

fn load_key<W: Word>(params: &Params<W>, mut stream: StreamState<'_>) -> Result<[u8; MAX_BLOCK_LEN], DigestError> {
    let block_len = params.variant.block_len();
    let mut block = [0u8; MAX_BLOCK_LEN];
    let len = stream.remaining();

    if len > block_len as u64 {
        debug!(len, "hashing oversized key");
        let mut assembler = BlockAssembler::new(stream, W::WIDTH, None);
        let state = hash_state(params, &mut assembler)?;
        let digest = format::raw(&state, params.truncation);
        block[..digest.len()].copy_from_slice(digest.as_ref());
    } else {
        debug!(len, "using key as-is");
        let bytes = stream.take(len as usize)?;
        block[..bytes.len()].copy_from_slice(bytes);
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use std::io::{ErrorKind, Write};
    use std::path::Path;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::digest::variant::{lookup, Variant};
    use crate::digest;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";
    const LARGE_KEY_DATA: &[u8] = b"Test Using Larger Than Block-Size Key - Hash Key First";

    fn hex(variant: Variant, message: &[u8], key: &[u8]) -> String {
        crate::hmac(variant, Source::Memory(message), Source::Memory(key), &DigestOptions::default())
            .unwrap()
            .to_string()
    }

    #[test]
    fn quick_brown_fox() {
        assert_eq!(
            hex(Variant::Sha256, FOX, b"key"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
        assert_eq!(
            hex(Variant::Sha512, FOX, b"key"),
            "b42af09057bac1e2d41708e48a902e09b5ff7f12ab428a4fe86653c73dd248fb\
             82f948a549f7b791a5b41915ee4d1ec3935357e4e2317250d0372afa2ebeeb3a"
        );
    }

    // RFC 4231 test case 1
    #[test]
    fn rfc4231_hi_there() {
        let key = [0x0b; 20];
        let cases = [
            (Variant::Sha224, "896fb1128abbdf196832107cd49df33f47b4b1169912ba4f53684b22"),
            (Variant::Sha256, "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"),
            (Variant::Sha384, "afd03944d84895626b0825f4ab46907f15f9dadbe4101ec682aa034c7cebc59c\
                               faea9ea9076ede7f4af152e8b2fa9cb6"),
            (Variant::Sha512, "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
                               daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"),
        ];
        for (variant, expected) in cases {
            assert_eq!(hex(variant, b"Hi There", &key), expected, "{}", variant);
        }
    }

    // RFC 4231 test case 2
    #[test]
    fn rfc4231_jefe() {
        assert_eq!(
            hex(Variant::Sha256, b"what do ya want for nothing?", b"Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(
            hex(Variant::Sha384, b"what do ya want for nothing?", b"Jefe"),
            "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e\
             8e2240ca5e69e2c78b3239ecfab21649"
        );
    }

    // RFC 4231 test case 6
    #[test]
    fn rfc4231_key_larger_than_block() {
        let key = [0xaa; 131];
        assert_eq!(
            hex(Variant::Sha256, LARGE_KEY_DATA, &key),
            "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"
        );
        assert_eq!(
            hex(Variant::Sha512, LARGE_KEY_DATA, &key),
            "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352\
             6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598"
        );
    }

    #[test]
    fn truncated_variants() {
        let key = [0x0b; 20];
        assert_eq!(
            hex(Variant::Sha512_224, b"Hi There", &key),
            "b244ba01307c0e7a8ccaad13b1067a4cf6b961fe0c6a20bda3d92039"
        );
        assert_eq!(
            hex(Variant::Sha512_256, b"Hi There", &key),
            "9f9126c3d9c3c330d760425ca8a217e31feae31bfe70196ff81642b868402eab"
        );
    }

    #[test]
    fn long_key_equals_prehashed_key() {
        let key: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
        for variant in Variant::ALL {
            let prehashed = digest(variant, Source::Memory(&key), &DigestOptions::default().raw()).unwrap();
            let prehashed = prehashed.as_bytes().unwrap();
            assert_eq!(hex(variant, FOX, &key), hex(variant, FOX, prehashed), "{}", variant);
        }
    }

    #[test]
    fn block_sized_key_is_used_directly() {
        // Exactly one block: no hashing, so it must differ from the hashed form.
        let key = [0x42; 64];
        let prehashed = digest(Variant::Sha256, Source::Memory(&key), &DigestOptions::default().raw()).unwrap();
        assert_ne!(
            hex(Variant::Sha256, FOX, &key),
            hex(Variant::Sha256, FOX, prehashed.as_bytes().unwrap())
        );
    }

    #[test]
    fn key_and_message_files() {
        let message: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let message_file = temp_file(&message);
        let options = DigestOptions::default().with_read_ahead(256);

        for key in [&b"short key"[..], &[0x17; 64][..], &[0x17; 128][..], &[0x99; 500][..]] {
            let key_file = temp_file(key);
            for variant in Variant::ALL {
                let expected = crate::hmac(variant, Source::Memory(&message), Source::Memory(key), &options).unwrap();
                let from_files = crate::hmac(
                    variant,
                    Source::File(message_file.path()),
                    Source::File(key_file.path()),
                    &options,
                )
                .unwrap();
                assert_eq!(expected, from_files, "{} with {}-byte key", variant, key.len());
            }
        }
    }

    #[test]
    fn raw_output() {
        let raw = crate::hmac(
            Variant::Sha512_224,
            Source::Memory(FOX),
            Source::Memory(b"key"),
            &DigestOptions::default().raw(),
        )
        .unwrap();
        let text = hex(Variant::Sha512_224, FOX, b"key");
        assert_eq!(raw.as_bytes().map(|b| b.len()), Some(28));
        assert_eq!(raw.to_hex(), text);
    }

    #[test]
    fn missing_key_file() {
        let path = Path::new("/nonexistent/hmac/key");
        match crate::hmac(Variant::Sha256, Source::Memory(FOX), Source::File(path), &DigestOptions::default()) {
            Err(DigestError::KeySource { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_message_file_is_a_source_error() {
        let path = Path::new("/nonexistent/hmac/message");
        match crate::hmac(Variant::Sha256, Source::File(path), Source::Memory(b"key"), &DigestOptions::default()) {
            Err(DigestError::SourceOpen { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn key_file_failing_mid_hash() {
        let key_file = temp_file(&[0x24; 300]);
        let params = lookup::<u32>(Variant::Sha256).unwrap();
        // Measured at 400 bytes, so hashing runs off the end of the file.
        let stream = StreamState::file(key_file.path(), 128).unwrap().overstate_len(400);
        match load_key(&params, stream).map_err(DigestError::into_key_error) {
            Err(DigestError::KeySource { path, source }) => {
                assert_eq!(path, key_file.path());
                assert_eq!(source.kind(), ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn short_key_file_failing_mid_read() {
        let key_file = temp_file(&[0x24; 20]);
        let params = lookup::<u64>(Variant::Sha512).unwrap();
        let stream = StreamState::file(key_file.path(), 128).unwrap().overstate_len(100);
        assert!(matches!(
            load_key(&params, stream),
            Err(DigestError::SourceRead { .. })
        ));
    }

    #[test]
    fn hashed_key_block() {
        let key: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
        let params = lookup::<u32>(Variant::Sha224).unwrap();
        let block = load_key(&params, StreamState::memory(&key)).unwrap();
        let expected = digest(Variant::Sha224, Source::Memory(&key), &DigestOptions::default().raw()).unwrap();
        assert_eq!(&block[..28], expected.as_bytes().unwrap());
        assert!(block[28..].iter().all(|&b| b == 0));
    }
}
