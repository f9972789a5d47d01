use std::io::Write;

use crackle_core::{
    generator::mutations, AttackSpec, CancellationToken, CharSet, CrackleError, Event,
    HashFunction, HashOracle, SearchCoordinator, WordSource,
};
use tempfile::NamedTempFile;

fn md5_oracle(password: &str) -> HashOracle {
    let target = HashFunction::Md5.hex_digest(password.as_bytes());
    HashOracle::new(&target, HashFunction::Md5, None).unwrap()
}

fn wordlist(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for word in words {
        writeln!(file, "{word}").unwrap();
    }
    file
}

fn dictionary(source: WordSource) -> AttackSpec {
    AttackSpec::Dictionary {
        source,
        apply_mutations: false,
    }
}

#[test]
fn test_finds_password_in_wordlist() {
    let file = wordlist(&["password", "admin", "test"]);
    let spec = dictionary(WordSource::file(file.path()));

    for concurrency in [1, 4] {
        let result = SearchCoordinator::builder(md5_oracle("test"))
            .concurrency(concurrency)
            .build()
            .search(&spec)
            .unwrap();

        assert!(result.success());
        assert_eq!(Some("test"), result.password());
        assert!(result.attempts() >= 1);
        assert!(!result.interrupted());
    }
}

#[test]
fn test_exhausted_search_counts_every_word() {
    let words = (0..2500).map(|i| format!("word{i}")).collect::<Vec<_>>();
    let spec = dictionary(WordSource::words(words));

    for concurrency in [1, 2, 8] {
        let result = SearchCoordinator::builder(md5_oracle("not in the list"))
            .concurrency(concurrency)
            .batch_size(100)
            .build()
            .search(&spec)
            .unwrap();

        assert!(!result.success());
        assert_eq!(None, result.password());
        assert_eq!(2500, result.attempts());
        assert!(!result.interrupted());
    }
}

#[test]
fn test_empty_wordlist() {
    let file = wordlist(&["", "   ", ""]);
    let spec = dictionary(WordSource::file(file.path()));

    let result = SearchCoordinator::new(md5_oracle("test"))
        .search(&spec)
        .unwrap();

    assert!(!result.success());
    assert_eq!(0, result.attempts());
    assert_eq!(0., result.rate());
}

#[test]
fn test_missing_wordlist() {
    let spec = dictionary(WordSource::file("/no/such/wordlist.txt"));

    let error = SearchCoordinator::new(md5_oracle("test"))
        .search(&spec)
        .unwrap_err();

    assert!(matches!(error, CrackleError::Wordlist { .. }));
}

#[test]
fn test_inverted_length_range() {
    let spec = AttackSpec::BruteForce {
        min_length: 3,
        max_length: 1,
        charset: CharSet::resolve("digits").unwrap(),
    };

    let error = SearchCoordinator::new(md5_oracle("1"))
        .search(&spec)
        .unwrap_err();

    assert!(matches!(error, CrackleError::LengthRange { min: 3, max: 1 }));
}

#[test]
fn test_brute_force_through_the_pool() {
    let spec = AttackSpec::BruteForce {
        min_length: 1,
        max_length: 4,
        charset: CharSet::resolve("digits").unwrap(),
    };

    let result = SearchCoordinator::builder(md5_oracle("4711"))
        .concurrency(4)
        .batch_size(50)
        .build()
        .search(&spec)
        .unwrap();

    // 10 + 100 + 1000 candidates come before the 4 digit ones
    let position = 1110 + 4711 + 1;
    assert_eq!(Some("4711"), result.password());
    // batches queued behind the match may be skipped, so only the upper bound is exact
    assert!(result.attempts() >= 1);
    assert!(result.attempts() <= position + 50 * 4);
}

#[test]
fn test_hybrid_with_salt() {
    let target = HashFunction::Sha2_256.hex_digest(b"pepperadmin42");
    let oracle = HashOracle::new(&target, HashFunction::Sha2_256, Some("pepper".to_owned())).unwrap();
    let spec = AttackSpec::Hybrid {
        source: WordSource::words(["root", "admin"]),
        segment_length: 2,
        charset: CharSet::resolve("digits").unwrap(),
        placement: crackle_core::Placement::Both,
    };

    let result = SearchCoordinator::builder(oracle)
        .concurrency(1)
        .build()
        .search(&spec)
        .unwrap();

    // every form of "root" then the suffixes of "admin" up to "admin42"
    assert_eq!(Some("admin42"), result.password());
    assert_eq!(200 + 43, result.attempts());
}

#[test]
fn test_overshoot_is_bounded() {
    let words = (0..100_000).map(|i| format!("word{i}")).collect::<Vec<_>>();
    let position = words[..3]
        .iter()
        .map(|word| mutations(word).len() as u64)
        .sum::<u64>()
        + mutations("word3")
            .iter()
            .position(|mutation| mutation == "Word3!")
            .unwrap() as u64
        + 1;

    let spec = AttackSpec::Dictionary {
        source: WordSource::words(words),
        apply_mutations: true,
    };
    let (batch_size, concurrency) = (10, 4);

    let result = SearchCoordinator::builder(md5_oracle("Word3!"))
        .concurrency(concurrency)
        .batch_size(batch_size)
        .build()
        .search(&spec)
        .unwrap();

    assert_eq!(Some("Word3!"), result.password());
    assert!(result.attempts() >= 1);
    assert!(result.attempts() <= (batch_size * concurrency) as u64 + position);
}

#[test]
fn test_cancelled_search_keeps_statistics() {
    let spec = AttackSpec::BruteForce {
        min_length: 1,
        max_length: 3,
        charset: CharSet::resolve("digits").unwrap(),
    };
    let token = CancellationToken::new();
    token.cancel();

    let result = SearchCoordinator::builder(md5_oracle("999"))
        .concurrency(1)
        .build()
        .search_with_token(&spec, &token)
        .unwrap();

    assert!(result.interrupted());
    assert!(!result.success());
    assert_eq!(0, result.attempts());
}

#[test]
fn test_single_match_reported_when_many_batches_match() {
    // every fifth word matches, with one candidate per batch
    let words = (0..400)
        .map(|i| if i % 5 == 4 { "admin".to_owned() } else { format!("user{i}") })
        .collect::<Vec<_>>();
    let spec = dictionary(WordSource::words(words));

    for _ in 0..20 {
        let handle = SearchCoordinator::builder(md5_oracle("admin"))
            .concurrency(8)
            .batch_size(1)
            .build()
            .search_nonblocking(spec.clone());

        let mut found = Vec::new();
        while let Some(event) = handle.recv() {
            if let Event::Found(password) = event {
                found.push(password);
            }
        }
        let result = handle.join().unwrap();

        assert!(result.success());
        assert_eq!(Some("admin"), result.password());
        assert_eq!(vec!["admin"], found);
        assert!(result.attempts() >= 1);
        assert!(result.attempts() <= 5 + 8);
    }
}
