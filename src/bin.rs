/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The demo's entry point. It's just a thin wrapper around [rdpgl::main].

fn main() -> Result<(), String> {
    rdpgl::main(std::env::args())
}
