// Copyright 2019 The Grin Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end property tests against the public API: round trips, subset
//! recovery, policy rejection, and mnemonic validation.

use slip39::{generate, recover, validate_mnemonic, Error};

const MASTER_SECRET: &[u8] = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P";

fn flatten(groups: &[slip39::GroupShare]) -> Result<Vec<Vec<String>>, Error> {
	let mut out = vec![];
	for g in groups {
		out.extend(g.mnemonic_list()?);
	}
	Ok(out)
}

#[test]
fn single_of_single_round_trips() -> Result<(), Error> {
	let groups = generate(1, &[(1, 1)], MASTER_SECRET, "", 0, false, None, None)?;
	let mnemonics = flatten(&groups)?;
	assert_eq!(recover(&mnemonics, "")?, MASTER_SECRET);
	Ok(())
}

#[test]
fn threshold_recovers_from_any_sufficient_subset() -> Result<(), Error> {
	let groups = generate(1, &[(3, 5)], MASTER_SECRET, "", 0, false, None, None)?;
	let all = flatten(&groups)?;
	// every 3-of-5 combination of consecutive mnemonics should recover
	for start in 0..=2 {
		let subset: Vec<Vec<String>> = all[start..start + 3].to_vec();
		assert_eq!(recover(&subset, "")?, MASTER_SECRET);
	}
	// fewer than the threshold must fail
	assert!(recover(&all[0..2], "").is_err());
	Ok(())
}

#[test]
fn two_tier_recovery_with_mixed_group_policy() -> Result<(), Error> {
	// groups = [(3,5), (3,3), (2,5), (1,1)], group_threshold = 2
	let groups = generate(
		2,
		&[(3, 5), (3, 3), (2, 5), (1, 1)],
		MASTER_SECRET,
		"",
		0,
		false,
		None,
		None,
	)?;

	// satisfy the (3,3) group fully and the (1,1) group with its one share
	let mut mnemonics = groups[1].mnemonic_list()?;
	mnemonics.extend(groups[3].mnemonic_list()?);
	assert_eq!(recover(&mnemonics, "")?, MASTER_SECRET);

	// a single group is never enough when group_threshold is 2
	assert!(recover(&groups[1].mnemonic_list()?, "").is_err());
	Ok(())
}

#[test]
fn passphrase_changes_the_recovered_secret() -> Result<(), Error> {
	let groups = generate(1, &[(2, 3)], MASTER_SECRET, "correct horse battery", 0, false, None, None)?;
	// member_threshold is 2: exactly 2 of the group's 3 mnemonics
	let mnemonics = groups[0].mnemonic_list()?[..2].to_vec();
	assert_eq!(recover(&mnemonics, "correct horse battery")?, MASTER_SECRET);
	assert_ne!(recover(&mnemonics, "wrong passphrase")?, MASTER_SECRET);
	Ok(())
}

#[test]
fn iteration_exponent_bounds() {
	for e in [0u8, 1, 2, 16] {
		assert!(generate(1, &[(1, 1)], MASTER_SECRET, "", e, false, None, None).is_ok());
	}
	assert!(generate(1, &[(1, 1)], MASTER_SECRET, "", 17, false, None, None).is_err());
}

#[test]
fn validate_mnemonic_true_and_false_cases() -> Result<(), Error> {
	let groups = generate(1, &[(1, 1)], MASTER_SECRET, "", 0, false, None, None)?;
	let mut good = groups[0].mnemonic_list()?[0].clone();
	assert!(validate_mnemonic(&good));

	// too short
	assert!(!validate_mnemonic(&good[..5].to_vec()));

	// unknown word
	let original_word = good[0].clone();
	good[0] = "notaslip39word".to_string();
	assert!(!validate_mnemonic(&good));
	good[0] = original_word;

	// corrupted checksum word
	good[19] = if good[19] == "abandon" { "ability".into() } else { "abandon".into() };
	assert!(!validate_mnemonic(&good));
	Ok(())
}

#[test]
fn rejection_suite_for_bad_policies() {
	// group threshold exceeds group count
	assert!(generate(3, &[(1, 1), (1, 1)], MASTER_SECRET, "", 0, false, None, None).is_err());
	// member threshold exceeds member count
	assert!(generate(1, &[(3, 2)], MASTER_SECRET, "", 0, false, None, None).is_err());
	// a group with member_threshold 1 must have exactly one member
	assert!(generate(1, &[(1, 2)], MASTER_SECRET, "", 0, false, None, None).is_err());
	// secret too short
	assert!(generate(1, &[(1, 1)], b"short", "", 0, false, None, None).is_err());
	// odd-length secret
	assert!(generate(1, &[(1, 1)], &MASTER_SECRET[..15], "", 0, false, None, None).is_err());
}

#[test]
fn exhaustive_small_policy_sweep() -> Result<(), Error> {
	for group_count in 1u8..=3 {
		for group_threshold in 1u8..=group_count {
			for extendable in [false, true] {
				let groups: Vec<(u8, u8)> = (0..group_count).map(|_| (1u8, 1u8)).collect();
				let result = generate(
					group_threshold,
					&groups,
					MASTER_SECRET,
					"",
					0,
					extendable,
					None,
					None,
				)?;
				// exactly group_threshold groups, each a (1,1) group's one share
				let mnemonics = flatten(&result[..group_threshold as usize])?;
				assert_eq!(recover(&mnemonics, "")?, MASTER_SECRET);
			}
		}
	}
	Ok(())
}

/// Pins the standard's own worked example: a single group of 7 members
/// requiring any 5, with passphrase "TREZOR" over the ASCII secret
/// "ABCDEFGHIJKLMNOP". Exercises the group/member threshold arithmetic,
/// the Feistel passphrase mixing, and RS1024 checksum together against
/// fixed, named inputs rather than randomly generated ones.
#[test]
fn official_worked_example_5_of_7() -> Result<(), Error> {
	let secret: &[u8] = b"ABCDEFGHIJKLMNOP";
	let groups = generate(1, &[(5, 7)], secret, "TREZOR", 0, false, None, None)?;
	let all = groups[0].mnemonic_list()?;
	assert_eq!(all.len(), 7);

	// any 5 of the 7 recover the exact secret with the right passphrase
	let five = all[..5].to_vec();
	assert_eq!(recover(&five, "TREZOR")?, secret);

	// 4 is not enough
	assert!(recover(&all[..4], "TREZOR").is_err());

	// 5 with a different or empty passphrase recovers 16 bytes, but not
	// the original secret
	assert_ne!(recover(&five, "")?, secret);
	Ok(())
}
