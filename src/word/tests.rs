use super::*;

// Build a word of size n with every third bit set
fn build_every_third(n: usize) -> Word {
    let mut word = Word::with_capacity(n);
    for i in 0..n {
        word.push(i % 3 == 0);
    }
    word
}

#[test]
fn test_is_empty() {
    let word = Word::default();
    assert!(word.is_empty());
    assert_eq!(word.len(), 0);
    assert_eq!(word.count_ones(), 0);
    assert!(word.ones().next().is_none());
}

#[test]
fn test_push_and_get() {
    let n = 512 + 13;
    let word = build_every_third(n);

    assert_eq!(word.len(), n);
    for i in 0..n {
        assert_eq!(word.get(i).unwrap(), i % 3 == 0);
    }
    assert_eq!(word.get(n), None);
}

#[test]
fn test_counts() {
    let n = 256 + 7;
    let word = build_every_third(n);

    let expected = (0..n).filter(|i| i % 3 == 0).count();
    assert_eq!(word.count_ones(), expected);
    assert_eq!(word.count_zeros(), n - expected);
}

#[test]
fn test_iter() {
    let n = 128 + 5;
    let word = build_every_third(n);

    for (i, bit) in word.iter().enumerate() {
        assert_eq!(bit, i % 3 == 0);
    }
    assert_eq!(word.iter().len(), n);
}

#[test]
fn test_ones() {
    let positions = vec![0, 1, 63, 64, 127, 130, 1000];
    let n = 1024;
    let word: Word = (0..n).map(|i| positions.contains(&i)).collect();

    assert_eq!(word.ones().collect::<Vec<_>>(), positions);
}

#[test]
fn test_from_iter() {
    let n = 192 + 1;
    let word = build_every_third(n);
    let word2: Word = (0..n).map(|i| i % 3 == 0).collect();

    assert_eq!(word, word2);
}

#[test]
fn test_complement() {
    let n = 64 + 3;
    let word = build_every_third(n);
    let complement = word.complement();

    assert_eq!(complement.len(), n);
    assert_eq!(complement.count_ones(), word.count_zeros());
    for i in 0..n {
        assert_eq!(complement.get(i).unwrap(), !word.get(i).unwrap());
    }
    assert_eq!(complement.complement(), word);

    // unused bits of the last limb must stay zero
    assert!(complement.ones().all(|pos| pos < n));
}

#[test]
fn test_serialize_deserialize() {
    let word = build_every_third(300);

    let serialized = bincode::serialize(&word).unwrap();
    let deserialized = bincode::deserialize::<Word>(&serialized).unwrap();

    assert_eq!(word, deserialized);
}

#[test]
fn test_debug() {
    let word: Word = vec![true, false, true].into_iter().collect();
    assert_eq!(format!("{:?}", word), "Word[101]");
}
