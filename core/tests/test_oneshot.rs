#[cfg(test)]
mod oneshot_tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;

    use gzip_core::compression::{
        compress_all, compress_all_with_config, decompress_all, decompress_all_with_config,
        Gzippable, ProcessorConfig,
    };
    use gzip_core::types::GzipError;

    const PLAIN: &str = "hello world foo bar foo foo\n";
    const COMPRESSED: &str = "H4sIAAAAAAAAA8tIzcnJVyjPL8pJUUjLz1dISiwC00DMBQBN/m/HHAAAAA==";
    const WITH_NAME: &str = "H4sICElFQ1cAA2ZpbGUudHh0AMtIzcnJVyjPL8pJUUjLz1dISiwC00DMBQBN/m/HHAAAAA==";

    #[test]
    fn compress_matches_fixture() {
        let out = compress_all(PLAIN.as_bytes()).unwrap();
        assert_eq!(STANDARD.encode(out), COMPRESSED);
    }

    #[test]
    fn decompress_fixture_with_file_name() {
        let input = STANDARD.decode(WITH_NAME).unwrap();
        assert_eq!(decompress_all(&input).unwrap(), PLAIN.as_bytes());
    }

    #[test]
    fn roundtrip() {
        let out = compress_all(PLAIN.as_bytes()).unwrap();
        assert_eq!(decompress_all(&out).unwrap(), PLAIN.as_bytes());
    }

    #[test]
    fn empty_input_identity() {
        assert_eq!(compress_all(b"").unwrap(), Vec::<u8>::new());
        assert_eq!(decompress_all(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn corrupt_input_reports_native_message() {
        match decompress_all(b"foo") {
            Err(GzipError::Data(msg)) => assert_eq!(msg, "incorrect header check"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tiny_chunk_size_is_equivalent() {
        let config = ProcessorConfig::new(Some(3), Some(9));
        let gz = compress_all_with_config(PLAIN.as_bytes(), config.clone()).unwrap();
        assert_eq!(decompress_all_with_config(&gz, config).unwrap(), PLAIN.as_bytes());
    }

    #[test]
    fn level_zero_stores() {
        let data = vec![b'a'; 10_000];
        let stored = compress_all_with_config(&data, ProcessorConfig::default().with_level(0)).unwrap();
        let packed = compress_all(&data).unwrap();
        assert!(stored.len() > data.len());
        assert!(packed.len() < stored.len());
        assert_eq!(decompress_all(&stored).unwrap(), data);
    }

    #[test]
    fn gzippable_for_each_container() {
        let slice: &[u8] = PLAIN.as_bytes();
        assert_eq!(STANDARD.encode(slice.gzip_compressed().unwrap()), COMPRESSED);

        let vec = STANDARD.decode(WITH_NAME).unwrap();
        assert_eq!(vec.gzip_uncompressed().unwrap(), PLAIN.as_bytes());

        let bytes = Bytes::from_static(PLAIN.as_bytes());
        let gz: Bytes = bytes.gzip_compressed().unwrap();
        assert_eq!(gz.gzip_uncompressed().unwrap(), bytes);
    }

    #[test]
    fn large_text_roundtrip() {
        let input = vec!["hello world "; 100_000].join(", ");
        let gz = input.as_bytes().gzip_compressed().unwrap();
        assert!(gz.len() < input.len() / 50);
        assert_eq!(gz.gzip_uncompressed().unwrap(), input.as_bytes());
    }
}
