//! Calculate compression ratios for benchmark report

use oxihuff_codec::HuffEncoder;

fn generate_uniform(size: usize) -> Vec<u8> {
    vec![0xAA; size]
}

fn generate_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn generate_skewed(size: usize) -> Vec<u8> {
    // Geometric-like distribution over a handful of symbols.
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x0F1E2D3C4B5A6978;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = (seed >> 40) as u32 & 0xFF;
        data.push(b'a' + r.leading_zeros().saturating_sub(24) as u8);
    }
    data
}

fn generate_text(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        let remaining = size - data.len();
        let chunk_size = remaining.min(text.len());
        data.extend_from_slice(&text[..chunk_size]);
    }
    data
}

#[test]
fn calculate_compression_ratios() {
    let sizes = [("small_4KB", 4 * 1024), ("medium_64KB", 64 * 1024)];

    println!("\n=== COMPRESSION RATIOS ===\n");
    println!("| Pattern | Size | Original | Compressed | Avg bits | Savings |");
    println!("|---------|------|----------|------------|----------|---------|");

    let encoder = HuffEncoder::default();
    for (size_name, size) in sizes {
        let patterns = [
            ("uniform", generate_uniform(size)),
            ("random", generate_random(size)),
            ("skewed", generate_skewed(size)),
            ("text", generate_text(size)),
        ];

        for (pattern_name, data) in patterns {
            let (compressed, stats) = encoder.encode_with_stats(&data).unwrap();
            assert_eq!(stats.compressed_size(), compressed.len() as u64);

            // Huffman never spends more than 8 bits per symbol on bytes.
            assert!(stats.average_code_len() <= 8.0);

            println!(
                "| {:<11} | {:<12} | {:>8} | {:>10} | {:>8.3} | {:>6.1}% |",
                pattern_name,
                size_name,
                data.len(),
                compressed.len(),
                stats.average_code_len(),
                stats.space_savings()
            );
        }
    }
}
