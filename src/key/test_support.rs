//! Shared property-test bodies for the key layer, parametrized over the
//! plaintext word count so the P1-P9 suite (spec properties) runs against
//! more than one width without duplicating each test body per width.

macro_rules! test_gates {
    ($words: expr, $seed: expr) => {
        #[test]
        fn round_trip_holds_for_many_random_plaintexts() {
            let mut rng = StdRng::seed_from_u64($seed);
            let pk = PrivateKey::new($words, &mut rng);
            for _ in 0..100 {
                let m = BitVector::random(pk.n(), &mut rng);
                let ct = pk.encrypt(&m, &mut rng);
                assert_eq!(pk.decrypt(&ct), m);
            }
        }

        #[test]
        fn successive_encryptions_differ() {
            let mut rng = StdRng::seed_from_u64($seed + 1);
            let pk = PrivateKey::new($words, &mut rng);
            let m = BitVector::random(pk.n(), &mut rng);
            let a = pk.encrypt(&m, &mut rng);
            let b = pk.encrypt(&m, &mut rng);
            assert_ne!(a, b);
        }

        #[test]
        fn homomorphic_lmm_matches_plaintext_multiplication() {
            let mut rng = StdRng::seed_from_u64($seed + 2);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            for _ in 0..100 {
                let k = BitMatrix::random(pk.n(), pk.n(), &mut rng);
                let m = BitVector::random(pk.n(), &mut rng);
                let ct = pk.encrypt(&m, &mut rng);
                let z = public.lmm_z(&k);
                let out = public.homomorphic_lmm(&z, &ct);
                assert_eq!(pk.decrypt(&out), k.mul_vec(&m));
            }
        }

        #[test]
        fn homomorphic_xor_matches_plaintext_xor() {
            let mut rng = StdRng::seed_from_u64($seed + 3);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            for _ in 0..100 {
                let m1 = BitVector::random(pk.n(), &mut rng);
                let m2 = BitVector::random(pk.n(), &mut rng);
                let e1 = pk.encrypt(&m1, &mut rng);
                let e2 = pk.encrypt(&m2, &mut rng);
                let out = public.homomorphic_xor(&e1, &e2, &mut rng);
                assert_eq!(pk.decrypt(&out), &m1 ^ &m2);
            }
        }

        #[test]
        fn homomorphic_and_matches_plaintext_and() {
            let mut rng = StdRng::seed_from_u64($seed + 4);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            for _ in 0..100 {
                let m1 = BitVector::random(pk.n(), &mut rng);
                let m2 = BitVector::random(pk.n(), &mut rng);
                let e1 = pk.encrypt(&m1, &mut rng);
                let e2 = pk.encrypt(&m2, &mut rng);
                let out = public.homomorphic_and(&e1, &e2, &mut rng);
                let mut expected = BitVector::zero(pk.n());
                for i in 0..pk.n() {
                    expected.set(i, m1.get(i) && m2.get(i));
                }
                assert_eq!(pk.decrypt(&out), expected);
            }
        }

        #[test]
        fn shift_specializations_match_plaintext_shifts() {
            let mut rng = StdRng::seed_from_u64($seed + 5);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            let n = pk.n();

            let m = BitVector::random(n, &mut rng);
            let ct = pk.encrypt(&m, &mut rng);

            let left = BitMatrix::left_shift(n);
            let out = public.homomorphic_lmm(&public.left_shift(), &ct);
            assert_eq!(pk.decrypt(&out), left.mul_vec(&m));

            let right = BitMatrix::right_shift(n);
            let out = public.homomorphic_lmm(&public.right_shift(), &ct);
            assert_eq!(pk.decrypt(&out), right.mul_vec(&m));
        }

        #[test]
        fn column_projectors_broadcast_the_chosen_bit() {
            let mut rng = StdRng::seed_from_u64($seed + 6);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            let n = pk.n();

            let m = BitVector::random(n, &mut rng);
            let ct = pk.encrypt(&m, &mut rng);

            let left_out = public.homomorphic_lmm(&public.left_column(), &ct);
            let left_decrypted = pk.decrypt(&left_out);
            for i in 0..n {
                assert_eq!(left_decrypted.get(i), m.get(0));
            }

            let right_out = public.homomorphic_lmm(&public.right_column(), &ct);
            let right_decrypted = pk.decrypt(&right_out);
            for i in 0..n {
                assert_eq!(right_decrypted.get(i), m.get(n - 1));
            }
        }

        #[test]
        fn gate_composition_remains_a_valid_ciphertext() {
            let mut rng = StdRng::seed_from_u64($seed + 7);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);
            let public = PublicKey::new(&bk);
            let n = pk.n();

            let m1 = BitVector::random(n, &mut rng);
            let m2 = BitVector::random(n, &mut rng);
            let m3 = BitVector::random(n, &mut rng);
            let e1 = pk.encrypt(&m1, &mut rng);
            let e2 = pk.encrypt(&m2, &mut rng);
            let e3 = pk.encrypt(&m3, &mut rng);

            let xor_out = public.homomorphic_xor(&e1, &e2, &mut rng);
            let and_out = public.homomorphic_and(&xor_out, &e3, &mut rng);

            let mut expected = BitVector::zero(n);
            for i in 0..n {
                expected.set(i, (m1.get(i) ^ m2.get(i)) && m3.get(i));
            }
            assert_eq!(pk.decrypt(&and_out), expected);
        }

        #[test]
        fn bridge_key_rerandomizes_binary_gate_matrices() {
            let mut rng = StdRng::seed_from_u64($seed + 8);
            let pk = PrivateKey::new($words, &mut rng);
            let bk = BridgeKey::new(&pk, &mut rng);

            let a = bk.xor(&mut rng);
            let b = bk.xor(&mut rng);
            assert_ne!(a.xx(), b.xx());

            // Both evaluators must still satisfy P4 despite the fresh Rx/Ry.
            let m1 = BitVector::random(pk.n(), &mut rng);
            let m2 = BitVector::random(pk.n(), &mut rng);
            let e1 = pk.encrypt(&m1, &mut rng);
            let e2 = pk.encrypt(&m2, &mut rng);
            assert_eq!(pk.decrypt(&a.apply(&e1, &e2)), &m1 ^ &m2);
            assert_eq!(pk.decrypt(&b.apply(&e1, &e2)), &m1 ^ &m2);
        }
    };
}

pub(crate) use test_gates;
