// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use skiroute::resort::ResortSpec;
use skiroute::speeds::SpeedTable;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let parsed: Vec<ResortSpec> = [
        toml::from_str::<ResortSpec>(text).ok(),
        serde_json::from_str::<ResortSpec>(text).ok(),
    ]
    .into_iter()
    .flatten()
    .collect();

    for spec in parsed {
        if let Ok(graph) = spec.build(&SpeedTable::default()) {
            assert_eq!(graph.edge_count(), graph.runs().count());
        }
    }
});
