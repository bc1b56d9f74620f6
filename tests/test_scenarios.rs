//! The literal end-to-end scenarios S1-S6 from spec §8.

use gf256_cauchy::{decode, encode, Block, Params};

fn make_recoveries(params: &Params, originals: &[&[u8]]) -> Vec<u8> {
    let mut region = vec![0u8; params.recovery_count() * params.block_bytes()];
    encode(params, originals, &mut region).unwrap();
    region
}

#[test]
fn s1_replace_original_0_with_recovery_0() {
    let params = Params::new(4096, 2, 2).unwrap();
    let originals_owned = vec![vec![0x01u8; 4096], vec![0x01u8; 4096]];
    let originals: Vec<&[u8]> = originals_owned.iter().map(|v| v.as_slice()).collect();
    let recoveries = make_recoveries(&params, &originals);

    let mut rec0 = recoveries[0..4096].to_vec();
    let mut orig1 = originals_owned[1].clone();
    let mut blocks = vec![Block::new(2, &mut rec0), Block::new(1, &mut orig1)];

    decode(&params, &mut blocks).unwrap();

    let restored = blocks.iter().find(|b| b.index == 0).unwrap();
    assert!(restored.buffer.iter().all(|&byte| byte == 0x01));
}

#[test]
fn s2_replace_two_originals_with_two_recoveries() {
    use rand::RngCore;
    let params = Params::new(4096, 4, 4).unwrap();
    let mut data = vec![0u8; 4 * 4096];
    rand::rng().fill_bytes(&mut data);
    let originals_owned: Vec<Vec<u8>> = data.chunks(4096).map(|c| c.to_vec()).collect();
    let originals: Vec<&[u8]> = originals_owned.iter().map(|v| v.as_slice()).collect();
    let recoveries = make_recoveries(&params, &originals);

    let mut rec0 = recoveries[0..4096].to_vec();
    let mut rec1 = recoveries[4096..8192].to_vec();
    let mut orig2 = originals_owned[2].clone();
    let mut orig3 = originals_owned[3].clone();
    let mut blocks = vec![
        Block::new(4, &mut rec0),
        Block::new(5, &mut rec1),
        Block::new(2, &mut orig2),
        Block::new(3, &mut orig3),
    ];

    decode(&params, &mut blocks).unwrap();

    for i in 0..2 {
        let restored = blocks.iter().find(|b| b.index == i).unwrap();
        assert_eq!(restored.buffer, &originals_owned[i][..]);
    }
}

#[test]
fn s3_parity_block_is_xor_of_three_originals() {
    let params = Params::new(1, 3, 2).unwrap();
    let originals: Vec<&[u8]> = vec![&[0xAA], &[0x55], &[0xFF]];
    let recoveries = make_recoveries(&params, &originals);
    assert_eq!(recoveries[0], 0xAA ^ 0x55 ^ 0xFF);
    assert_eq!(recoveries[0], 0x00);
}

#[test]
fn s4_five_originals_three_recoveries_two_erasures() {
    let params = Params::new(64, 5, 3).unwrap();
    let originals_owned: Vec<Vec<u8>> = (0..5)
        .map(|i: u8| (0..64u32).map(|x| (x as u8).wrapping_add(i * 17)).collect())
        .collect();
    let originals: Vec<&[u8]> = originals_owned.iter().map(|v| v.as_slice()).collect();
    let recoveries = make_recoveries(&params, &originals);

    // Drop originals 2 and 4, supply recoveries 0 and 2.
    let mut o0 = originals_owned[0].clone();
    let mut o1 = originals_owned[1].clone();
    let mut o3 = originals_owned[3].clone();
    let mut rec0 = recoveries[0..64].to_vec();
    let mut rec2 = recoveries[128..192].to_vec();

    let mut blocks = vec![
        Block::new(0, &mut o0),
        Block::new(1, &mut o1),
        Block::new(3, &mut o3),
        Block::new(5, &mut rec0), // recovery ordinal 0 -> index k+0 = 5
        Block::new(7, &mut rec2), // recovery ordinal 2 -> index k+2 = 7
    ];

    decode(&params, &mut blocks).unwrap();

    for i in 0..5 {
        let restored = blocks.iter().find(|b| b.index == i).unwrap();
        assert_eq!(restored.buffer, &originals_owned[i][..]);
    }
}

#[test]
fn s5_invalid_inputs() {
    assert!(Params::new(64, 0, 4).is_err());
    let err = Params::new(64, 200, 100).unwrap_err();
    assert_eq!(err.status_code(), -2);

    let params = Params::new(4, 2, 2).unwrap();
    let mut b0 = vec![1u8; 4];
    let mut b1 = vec![2u8; 4];
    let mut blocks = vec![Block::new(0, &mut b0), Block::new(0, &mut b1)];
    let err = decode(&params, &mut blocks).unwrap_err();
    assert_eq!(err.status_code(), -5);
}

#[test]
fn s6_k_equals_one_all_recoveries_equal_original() {
    let params = Params::new(8, 1, 3).unwrap();
    let original: Vec<u8> = vec![0, 1, 2, 3, 4, 5, 6, 7];
    let originals: Vec<&[u8]> = vec![&original];
    let recoveries = make_recoveries(&params, &originals);
    for chunk in recoveries.chunks(8) {
        assert_eq!(chunk, &original[..]);
    }

    // Supply only recovery 2 to decode.
    let mut rec2 = recoveries[16..24].to_vec();
    let mut blocks = vec![Block::new(3, &mut rec2)]; // index k+2 = 3
    decode(&params, &mut blocks).unwrap();
    assert_eq!(blocks[0].index, 0);
    assert_eq!(blocks[0].buffer, &original[..]);
}
