extern crate teesection;

use std::env;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::process;

use log::debug;
use teesection::TeeSectionReader;

/// `io::Write` adapter over a [`crc32fast::Hasher`]: every written byte is
/// fed to the digest.
struct HasherSink<'a>(&'a mut crc32fast::Hasher);

impl Write for HasherSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Checksums a file section by section through tee windows, reading every
/// section twice the way a checksumming transport would. The digest still
/// comes out right because each byte reaches the hasher only once.
fn main() {
    env_logger::init();

    let args = env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        eprintln!("usage: teesum <file> [section-size]");
        process::exit(1);
    }

    let name = &args[1];
    let section: u64 = if args.len() > 2 {
        args[2].parse().expect("section size must be a number")
    } else {
        4096
    };

    let file = File::open(name).unwrap();
    let len = file.metadata().unwrap().len();

    let mut hasher = crc32fast::Hasher::new();
    let mut total = 0u64;

    let mut start = 0;
    while start < len {
        let n = section.min(len - start);
        let mut reader = TeeSectionReader::new(&file, HasherSink(&mut hasher), start, n);

        // First pass: what the transport reads to checksum the request.
        let mut first = Vec::new();
        reader.read_to_end(&mut first).unwrap();

        // Second pass: the re-read for the actual transfer.
        reader.seek(SeekFrom::Start(0)).unwrap();
        let mut second = Vec::new();
        reader.read_to_end(&mut second).unwrap();

        debug!(
            "section {}..{}: {} bytes, re-read identical: {}",
            start,
            start + n,
            second.len(),
            first == second
        );

        total += second.len() as u64;
        start += n;
    }

    println!("{} bytes, crc32 {:08x}", total, hasher.finalize());
}
