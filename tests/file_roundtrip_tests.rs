use huffpack::{EncodeOptions, HuffError, HuffmanEncoder, decode_file, encode_file};
use std::fs;
use std::path::Path;

fn roundtrip_file(dir: &Path, name: &str, contents: &[u8], options: EncodeOptions) {
    let input = dir.join(name);
    let compressed = dir.join(format!("{}.huf", name));
    let restored = dir.join(format!("{}.out", name));
    fs::write(&input, contents).unwrap();

    let summary = HuffmanEncoder::new(options)
        .encode_file(&input, &compressed)
        .expect("encode failed");
    assert_eq!(summary.input_bytes, contents.len() as u64);
    assert_eq!(summary.output_bytes, fs::metadata(&compressed).unwrap().len());

    let len = decode_file(&compressed, &restored).expect("decode failed");
    assert_eq!(len, contents.len() as u64);
    assert_eq!(fs::read(&restored).unwrap(), contents);
}

/// Round trip of text, binary, degenerate and empty files through disk
#[test]
fn test_file_roundtrips() {
    let dir = tempfile::tempdir().unwrap();

    let text = "Huffman encoding is a greedy algorithm that builds optimal prefix codes. \
                The quick brown fox jumps over the lazy dog."
        .repeat(20);
    let binary: Vec<u8> = (0..50_000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();

    let cases: [(&str, &[u8]); 5] = [
        ("text.txt", text.as_bytes()),
        ("binary.bin", &binary),
        ("repeated.bin", &[b'z'; 1000]),
        ("one.bin", b"!"),
        ("empty.bin", b""),
    ];

    for (name, contents) in cases {
        println!("Round trip {} ({} bytes)", name, contents.len());
        roundtrip_file(dir.path(), name, contents, EncodeOptions::default());
        roundtrip_file(
            dir.path(),
            &format!("direct-{}", name),
            contents,
            EncodeOptions {
                atomic: false,
                ..Default::default()
            },
        );
    }
}

/// An empty input produces a zero-byte output file
#[test]
fn test_empty_file_gives_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty");
    let output = dir.path().join("empty.huf");
    fs::write(&input, b"").unwrap();

    let summary = encode_file(&input, &output).unwrap();
    assert_eq!(summary.output_bytes, 0);
    assert_eq!(fs::read(&output).unwrap(), Vec::<u8>::new());
}

/// Existing output files are overwritten
#[test]
fn test_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.huf");
    fs::write(&input, b"aaab").unwrap();
    fs::write(&output, vec![0xEE; 4096]).unwrap();

    encode_file(&input, &output).unwrap();
    assert_eq!(fs::read(&output).unwrap(), vec![0x58, 0xAC, 0x3C, 0x07]);
}

/// Text compresses below its original size
#[test]
fn test_text_shrinks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lorem.txt");
    let output = dir.path().join("lorem.huf");
    fs::write(&input, "lorem ipsum dolor sit amet ".repeat(500)).unwrap();

    let summary = encode_file(&input, &output).unwrap();
    println!("Compression ratio: {:.3}", summary.ratio());
    assert!(summary.ratio() < 0.6);
}

/// Open failures name the offending path and leave no output behind
#[test]
fn test_open_failures() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let output = dir.path().join("never.huf");

    match encode_file(&missing, &output) {
        Err(HuffError::Open { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected open error, got {:?}", other),
    }
    assert!(!output.exists());

    let input = dir.path().join("present.txt");
    fs::write(&input, b"data").unwrap();
    let bad_output = dir.path().join("no_such_dir").join("out.huf");
    for atomic in [true, false] {
        let encoder = HuffmanEncoder::new(EncodeOptions {
            atomic,
            ..Default::default()
        });
        let result = encoder.encode_file(&input, &bad_output);
        assert!(matches!(result, Err(HuffError::Open { .. })), "atomic = {}", atomic);
    }

    assert!(matches!(
        decode_file(&missing, &output),
        Err(HuffError::Open { .. })
    ));
}

/// Corrupt compressed files are reported, not decoded into garbage
#[test]
fn test_corrupt_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.huf");
    let output = dir.path().join("bad.out");
    fs::write(&input, [0x58, 0xAC, 0x3C, 0x00]).unwrap();

    assert!(matches!(
        decode_file(&input, &output),
        Err(HuffError::CorruptStream(_))
    ));
}

/// A read failure after the input opened keeps the old output in atomic mode
/// and leaves it truncated otherwise
#[cfg(unix)]
#[test]
fn test_read_failure_and_destination() {
    let dir = tempfile::tempdir().unwrap();
    // opening a directory succeeds on unix, reading it fails with EISDIR
    let input = dir.path().join("not_a_file");
    fs::create_dir(&input).unwrap();

    for (atomic, expected) in [(true, &b"old"[..]), (false, &b""[..])] {
        let output = dir.path().join(format!("out-{}.huf", atomic));
        fs::write(&output, b"old").unwrap();

        let result = HuffmanEncoder::new(EncodeOptions {
            atomic,
            ..Default::default()
        })
        .encode_file(&input, &output);
        println!("atomic = {}: {:?}", atomic, result);
        assert!(matches!(result, Err(HuffError::Read(_))), "atomic = {}", atomic);
        assert_eq!(fs::read(&output).unwrap(), expected, "atomic = {}", atomic);
    }

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| !name.to_string_lossy().starts_with("out-") && name != "not_a_file")
        .collect();
    assert!(leftovers.is_empty(), "temporary files left: {:?}", leftovers);
}

/// Replacing an output in atomic mode keeps its permission bits
#[cfg(unix)]
#[test]
fn test_atomic_replace_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("shared.huf");
    fs::write(&input, b"aaab").unwrap();
    fs::write(&output, b"old").unwrap();
    fs::set_permissions(&output, fs::Permissions::from_mode(0o644)).unwrap();

    encode_file(&input, &output).unwrap();
    let mode = fs::metadata(&output).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
    assert_eq!(fs::read(&output).unwrap(), vec![0x58, 0xAC, 0x3C, 0x07]);
}
