#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use gzip_core::compression::{
        compress_all, decompress_all, GzipCompressor, GzipDecompressor, GzipProcessor,
        ProcessorConfig,
    };
    use gzip_core::stream::{ByteSource, Deadline, GzipStream, MemorySource};

    fn run_chunked(p: &mut dyn GzipProcessor, data: &[u8], size: usize) -> Vec<u8> {
        p.initialize().unwrap();
        let mut out = Vec::new();
        if data.is_empty() {
            out.extend(p.process(&[], true).unwrap());
            return out;
        }
        let chunks: Vec<&[u8]> = data.chunks(size).collect();
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            out.extend(p.process(chunk, i == last).unwrap());
        }
        out
    }

    fn payload() -> impl Strategy<Value = Vec<u8>> {
        prop_oneof![
            proptest::collection::vec(any::<u8>(), 0..4096),
            proptest::collection::vec(prop::sample::select(b"ab \n".to_vec()), 0..8192),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_roundtrip(data in payload()) {
            let gz = compress_all(&data).unwrap();
            prop_assert_eq!(decompress_all(&gz).unwrap(), data);
        }

        #[test]
        fn prop_chunked_compress_is_valid(data in payload(), size in 1usize..64) {
            let mut c = GzipCompressor::with_config(ProcessorConfig::new(Some(64), None));
            let gz = run_chunked(&mut c, &data, size);
            prop_assert!(c.is_closed());
            prop_assert_eq!(decompress_all(&gz).unwrap(), data);
        }

        #[test]
        fn prop_chunked_decompress_matches_single_call(data in payload(), size in 1usize..64) {
            let gz = GzipStream::compress(MemorySource::new(data.clone()))
                .unwrap()
                .drain(Deadline::Never)
                .unwrap();
            let mut d = GzipDecompressor::with_config(ProcessorConfig::new(Some(32), None));
            let plain = run_chunked(&mut d, &gz, size);
            prop_assert!(d.is_closed());
            prop_assert_eq!(plain, data);
        }

        #[test]
        fn prop_adapter_read_size_does_not_matter(data in payload(), read_size in 1usize..512) {
            let compress = GzipStream::compress(MemorySource::new(data.clone())).unwrap();
            let mut decompress = GzipStream::decompress(compress).unwrap();
            let mut out = Vec::new();
            while !decompress.is_closed() {
                out.extend_from_slice(&decompress.read(read_size, Deadline::Never).unwrap());
            }
            prop_assert_eq!(out, data);
        }
    }
}
