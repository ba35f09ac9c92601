#[cfg(test)]
mod processor_tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use gzip_core::compression::{
        compress_all, create_processor, decompress_all, GzipCompressor, GzipDecompressor, GzipProcessor, Mode, ProcessorConfig,
        TRUNCATED_STREAM,
    };
    use gzip_core::types::GzipError;

    const PLAIN_27: &str = "hello world foo bar foo foo";
    const ZIPPED_27: &str = "H4sIAAAAAAAA/8tIzcnJVyjPL8pJUUjLz1dISiwC00AMAFeJPLcbAAAA";

    fn feed_in_slices(p: &mut dyn GzipProcessor, data: &[u8], size: usize, last_flag: bool) -> Vec<u8> {
        let mut out = Vec::new();
        let chunks: Vec<&[u8]> = data.chunks(size).collect();
        let rounds = chunks.len();
        for (i, chunk) in chunks.into_iter().enumerate() {
            let is_last = last_flag && i + 1 == rounds;
            out.extend(p.process(chunk, is_last).unwrap());
        }
        out
    }

    #[test]
    fn five_byte_chunks_compress_to_sync_flushed_member() {
        let mut p = Mode::Compress.processor(ProcessorConfig::default());
        p.initialize().unwrap();
        let out = feed_in_slices(p.as_mut(), PLAIN_27.as_bytes(), 5, true);
        assert!(p.is_closed());
        assert_eq!(
            STANDARD.encode(out),
            "H4sIAAAAAAAAA8pIzcnJBwAAAP//UijPL8oBAAAA//9KUUjLzwcAAAD//1JISixSAAAAAP//AtFpAAAAAP//y88HAFeJPLcbAAAA"
        );
    }

    #[test]
    fn five_byte_chunks_then_flush_with_empty() {
        let mut p = GzipCompressor::new();
        p.initialize().unwrap();
        let mut out = feed_in_slices(&mut p, PLAIN_27.as_bytes(), 5, false);
        assert!(!p.is_closed());

        out.extend(p.flush().unwrap());
        assert!(p.is_closed());
        assert_eq!(
            STANDARD.encode(&out),
            "H4sIAAAAAAAAA8pIzcnJBwAAAP//UijPL8oBAAAA//9KUUjLzwcAAAD//1JISixSAAAAAP//AtFpAAAAAP//ys8HAAAA//8DAFeJPLcbAAAA"
        );

        for _ in 0..3 {
            assert!(p.safe_flush().unwrap().is_empty());
        }
        assert_eq!(p.counters().flushes, 1);
    }

    #[test]
    fn five_byte_chunks_decompress() {
        let zipped = STANDARD.decode(ZIPPED_27).unwrap();
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        let out = feed_in_slices(&mut p, &zipped, 5, true);
        assert_eq!(out, PLAIN_27.as_bytes());
        assert!(p.is_closed());
    }

    #[test]
    fn decompress_finalizes_at_natural_end() {
        let zipped = STANDARD.decode(ZIPPED_27).unwrap();
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        let out = p.process(&zipped, false).unwrap();
        assert_eq!(out, PLAIN_27.as_bytes());
        assert!(p.is_closed());
        assert_eq!(p.counters().finalizations, 1);
        assert!(matches!(p.process(b"more", false), Err(GzipError::AlreadyClosed)));
    }

    #[test]
    fn output_is_per_call_not_cumulative() {
        let mut p = GzipCompressor::new();
        p.initialize().unwrap();
        let a = p.process(b"aaaa", false).unwrap();
        let b = p.process(b"bbbb", false).unwrap();
        assert!(!a.is_empty() && !b.is_empty());
        assert_ne!(a, b);
        assert_eq!(p.counters().bytes_out, (a.len() + b.len()) as u64);
    }

    #[test]
    fn double_close_is_safe() {
        let mut p = GzipCompressor::new();
        p.initialize().unwrap();
        p.close();
        p.close();
        assert!(p.is_closed());
        assert_eq!(p.counters().finalizations, 1);
        assert!(p.safe_flush().unwrap().is_empty());
        assert!(matches!(p.flush(), Err(GzipError::AlreadyClosed)));
    }

    #[test]
    fn initialize_twice_fails() {
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        assert!(matches!(p.initialize(), Err(GzipError::Initialization(m)) if m == "already initialized"));
    }

    #[test]
    fn invalid_config_fails_initialize() {
        let mut p = create_processor(Mode::Compress, ProcessorConfig::default().with_level(12));
        assert!(matches!(p.initialize(), Err(GzipError::Initialization(_))));
    }

    #[test]
    fn corrupt_input_is_data_error_and_finalizes() {
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        match p.process(b"foo", true) {
            Err(GzipError::Data(msg)) => assert_eq!(msg, "incorrect header check"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(p.is_closed());
        assert_eq!(p.counters().finalizations, 1);
        assert_eq!(p.counters().chunks, 0);
    }

    #[test]
    fn truncated_member_is_data_error() {
        let zipped = STANDARD.decode(ZIPPED_27).unwrap();
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        let err = p.process(&zipped[..zipped.len() - 4], true).unwrap_err();
        assert!(matches!(err, GzipError::Data(ref m) if m == TRUNCATED_STREAM));
        assert_eq!(err.status_code(), Some(-3));
    }

    fn two_members() -> (Vec<u8>, usize) {
        let mut input = STANDARD.decode(ZIPPED_27).unwrap();
        let first_len = input.len();
        input.extend(compress_all(b"second member\n").unwrap());
        (input, first_len)
    }

    #[test]
    fn data_after_member_fails_in_the_same_chunk() {
        let (input, _) = two_members();
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        assert!(matches!(p.process(&input, true), Err(GzipError::AlreadyClosed)));
        assert!(p.is_closed());
        assert!(matches!(decompress_all(&input), Err(GzipError::AlreadyClosed)));
    }

    #[test]
    fn data_after_member_fails_regardless_of_split() {
        let (input, first_len) = two_members();
        for split in [first_len - 3, first_len, first_len + 5] {
            let mut p = GzipDecompressor::new();
            p.initialize().unwrap();
            let first = p.process(&input[..split], false);
            let outcome = first.and_then(|_| p.process(&input[split..], true));
            assert!(
                matches!(outcome, Err(GzipError::AlreadyClosed)),
                "split at {split}: {outcome:?}"
            );
        }
    }

    #[test]
    fn garbage_after_member_is_not_swallowed() {
        let mut zipped = STANDARD.decode(ZIPPED_27).unwrap();
        zipped.extend_from_slice(b"\x00\x00garbage");
        let mut p = GzipDecompressor::new();
        p.initialize().unwrap();
        assert!(matches!(p.process(&zipped, true), Err(GzipError::AlreadyClosed)));
    }

    #[test]
    fn empty_non_final_chunks_are_harmless() {
        let mut c = GzipCompressor::new();
        c.initialize().unwrap();
        let mut gz = c.process(b"", false).unwrap();
        gz.extend(c.process(b"abc", false).unwrap());
        gz.extend(c.process(b"", false).unwrap());
        gz.extend(c.process(b"", true).unwrap());

        let mut d = GzipDecompressor::new();
        d.initialize().unwrap();
        assert!(d.process(b"", false).unwrap().is_empty());
        assert_eq!(d.process(&gz, true).unwrap(), b"abc");
    }

    #[test]
    fn large_payload_single_call() {
        let data: Vec<u8> = (0..3_000_000u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
        let mut c = GzipCompressor::new();
        c.initialize().unwrap();
        let gz = c.process(&data, true).unwrap();
        assert!(c.counters().buffer_grows > 0);

        let mut d = GzipDecompressor::new();
        d.initialize().unwrap();
        assert_eq!(d.process(&gz, true).unwrap(), data);
    }
}
