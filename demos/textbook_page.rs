//! Chunking a Textbook Page
//!
//! Labels and chunks one page of an elementary science textbook, printing
//! each chunk with its headings and categories.
//!
//! ```bash
//! RUST_LOG=bilah=debug cargo run --example textbook_page
//! ```

use bilah::{Block, Chunker, Pipeline};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = vec![
        Block::new("M0", "ISBN 978-602-244-381-1 (jil.4)"),
        Block::heading("H1", "Bab 1 Cahaya"),
        Block::heading("H2", "Topik A: Sumber Cahaya"),
        Block::new(
            "P3",
            "Tahukah kamu dari mana cahaya di bumi berasal?",
        ),
        Block::new("P4", "Matahari adalah sumber cahaya alami yang utama."),
        Block::heading("H5", "Ayo Mencoba"),
        Block::new("S6", "1. Siapkan senter"),
        Block::new("P7", "dan sebuah cermin kecil."),
        Block::new("S8", "2. Arahkan senter ke cermin di ruangan gelap."),
        Block::new("P9", "Setelah itu tuliskan arah pantulan cahayanya."),
        Block::heading("H10", "Kosakata Baru"),
        Block::new("P11", "Pantulan adalah peristiwa cahaya yang kembali setelah mengenai benda."),
        Block::heading("H12", "Mari Refleksikan"),
        Block::new("Q13", "1. Apa yang terjadi pada cahaya saat mengenai cermin?"),
        Block::new("Q14", "Bagaimana jika cerminnya diganti kertas?"),
    ];

    let chunks = Pipeline::default().chunk(&page);

    println!("Blocks: {}", page.len());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!("{chunk}");
        if !chunk.meta.headings.is_empty() {
            println!("  headings: {:?}", chunk.meta.headings);
        }
        for ((text, cue), category) in chunk
            .texts
            .iter()
            .zip(&chunk.cue_patterns)
            .zip(&chunk.categories)
        {
            println!("  [{category:<9}] {cue:<21} {text}");
        }
        println!();
    }
}
