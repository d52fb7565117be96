use raintable_commons::{build_chain, HashKind, Password};
use raintable_cpu::{build, find, load, save_binary, save_text, RainbowTableCtxBuilder};

fn small_ctx() -> raintable_commons::RainbowTableCtx {
    RainbowTableCtxBuilder::new()
        .hash(HashKind::Sha256)
        .chain_length(4)
        .password_length(3)
        .vertical(16)
        .build()
        .unwrap()
}

#[test]
fn every_row_is_reachable_from_its_seed_within_the_valid_salt_range() {
    let ctx = small_ctx();
    let table = build(ctx.clone(), 1, None).unwrap();
    assert_eq!(table.len(), 16);

    for (endpoint, seed) in table.rows() {
        let reachable = (0..ctx.vertical).any(|salt| build_chain(*seed, salt, &ctx) == *endpoint);
        assert!(
            reachable,
            "endpoint for seed {seed} is not reachable from any row salt in 0..{}",
            ctx.vertical
        );
    }
}

#[test]
fn finder_recovers_an_exact_stored_seed() {
    let ctx = small_ctx();
    let table = build(ctx, 1, None).unwrap();

    let (_, &seed) = table.rows().iter().next().unwrap();
    let target = table.ctx().hash.hash(&seed);

    let found = find(&table, &target, 2).expect("a stored seed must always be recoverable");
    assert_eq!(found.as_ref(), seed.as_ref());
}

#[test]
fn finder_on_an_uncovered_password_is_either_none_or_a_verified_hit() {
    let ctx = small_ctx();
    let table = build(ctx, 1, None).unwrap();

    for candidate in [b"zzz", b"qqq", b"xyz"] {
        let password = Password::new(candidate);
        if table.seeds().contains(&password) {
            continue;
        }
        let target = table.ctx().hash.hash(&password);
        match find(&table, &target, 2) {
            Some(found) => assert_eq!(table.ctx().hash.hash(&found), target),
            None => {}
        }
    }
}

#[test]
fn text_save_then_load_round_trips_rows_and_parameters() {
    let ctx = small_ctx();
    let table = build(ctx, 1, None).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    save_text(file.path(), &table).unwrap();
    let loaded = load(file.path()).unwrap();

    assert_eq!(loaded.len(), table.len());
    assert_eq!(loaded.ctx().hash, table.ctx().hash);
    assert_eq!(loaded.ctx().chain_length, table.ctx().chain_length);
    assert_eq!(loaded.ctx().password_length, table.ctx().password_length);
    for (endpoint, seed) in table.rows() {
        assert_eq!(loaded.rows().get(endpoint).unwrap().as_ref(), seed.as_ref());
    }
}

#[test]
fn truncated_binary_table_fails_to_load_with_a_size_mismatch() {
    let ctx = small_ctx();
    let table = build(ctx, 1, None).unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    save_binary(file.path(), &table).unwrap();

    let mut bytes = std::fs::read(file.path()).unwrap();
    bytes.truncate(bytes.len() - 4);
    std::fs::write(file.path(), &bytes).unwrap();

    let err = load(file.path()).unwrap_err();
    assert!(matches!(err, raintable_commons::RainbowError::SizeMismatch { .. }));
}

#[test]
fn a_file_with_an_unrecognized_magic_is_rejected_outright() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"ZZZZ not a table").unwrap();

    let err = load(file.path()).unwrap_err();
    assert!(matches!(err, raintable_commons::RainbowError::BadMagic));
}
