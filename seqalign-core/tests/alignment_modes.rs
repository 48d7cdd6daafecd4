use seqalign_core::*;

fn default_params() -> ScoringParams {
    ScoringParams::default()
}

#[test]
fn global_self_alignment_is_perfect() {
    let seq = b"ACGTTGCAAGCTTACG";
    let params = ScoringParams::new(1, -1, -2).with_error_rate(0.0);

    let result = align_global(seq, seq, &params);
    assert_eq!(result.score, seq.len() as i64);
    assert_eq!(result.match_count, seq.len());
    assert_eq!(result.error_count, 0);
    assert_eq!((result.qstart, result.qend), (0, seq.len()));
    assert_eq!((result.tstart, result.tend), (0, seq.len()));
}

#[test]
fn local_finds_embedded_run() {
    let result = align(AlignmentMode::Local, b"AAAA", b"TTAAAATT", &default_params());
    assert_eq!(result.qstart, 0);
    assert_eq!(result.qend, 4);
    assert_eq!(result.score, 4);
    assert!(result.tstart >= 2 && result.tend <= 6);
    assert_eq!(result.target_len(), 4);
}

#[test]
fn glocal_places_read_inside_reference() {
    let query = b"GATTACA";
    let target = b"CCCCCGATTACACCCCC";

    let result = align_glocal(query, target, &default_params());
    assert_eq!(result.qstart, 0);
    assert_eq!(result.qend, query.len());
    assert_eq!((result.tstart, result.tend), (5, 12));
    assert!(result.target_len() < target.len());
    assert_eq!(result.score, 7);
    assert_eq!(result.error_count, 0);
}

#[test]
fn glocal_tolerates_errors_within_rate() {
    // one substitution over a 10bp window
    let query = b"ACGTAGGTCA";
    let target = b"TTTTACGTACGTCATTTT";

    let strict = default_params();
    let relaxed = strict.with_error_rate(0.1);

    let rejected = align_glocal(query, target, &strict);
    assert_ne!(rejected.qend, query.len());

    let accepted = align_glocal(query, target, &relaxed);
    assert_eq!(accepted.qend, query.len());
    assert_eq!((accepted.tstart, accepted.tend), (4, 14));
    assert_eq!(accepted.match_count, 9);
    assert_eq!(accepted.error_count, 1);
    assert_eq!(accepted.score, 8);
}

#[test]
fn query_wildcards_never_count_as_errors() {
    let params = default_params().with_error_rate(0.0);
    assert_eq!(params.wildcard, WildcardPolicy::Query);

    let result = align_global(b"ACNTNN", b"ACGTAC", &params);
    assert_eq!(result.score, 6);
    assert_eq!(result.match_count, 6);
    assert_eq!(result.error_count, 0);

    // Wildcards only apply on the configured side
    let swapped = align_global(b"ACGTAC", b"ACNTNN", &params);
    assert!(swapped.is_empty());
    assert!(try_align_global(b"ACGTAC", b"ACNTNN", &params).is_none());

    let target_side = params.with_wildcard(WildcardPolicy::Target);
    let result = align_global(b"ACGTAC", b"ACNTNN", &target_side);
    assert_eq!(result.error_count, 0);
}

#[test]
fn empty_inputs_are_handled_in_every_mode() {
    let params = default_params();
    for mode in AlignmentMode::all() {
        assert!(align(mode, b"", b"ACGT", &params).is_empty(), "{mode} empty query");
        assert!(align(mode, b"ACGT", b"", &params).is_empty(), "{mode} empty target");
        assert!(align(mode, b"", b"", &params).is_empty(), "{mode} both empty");
    }
    assert_eq!(try_align_global(b"", b"", &params), Some(AlignResult::default()));
    assert_eq!(try_align_global(b"", b"ACGT", &params), None);
}

#[test]
fn results_are_deterministic() {
    let params = ScoringParams::new(2, -3, -5).with_error_rate(0.3);
    let query = b"ACGGTNACGTTAGC";
    let target = b"TTACGGTAACGTTAGCAAT";
    for mode in AlignmentMode::all() {
        let first = align(mode, query, target, &params);
        let second = align(mode, query, target, &params);
        assert_eq!(first, second);
    }
}

#[test]
fn equal_score_and_matches_prefers_later_column() {
    let result = align_local(b"GATC", b"GATCTTTTGATC", &default_params());
    assert_eq!(result.score, 4);
    assert_eq!((result.tstart, result.tend), (8, 12));
}

#[test]
fn result_serialises_to_json() {
    let result = align_local(b"AAAA", b"TTAAAATT", &default_params());
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"qend\":4"));
    let back: AlignResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
