/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains common functions to implement wait routines.

--*/

/// Spin until `predicate` holds. There is no timeout: a coprocessor that
/// never becomes ready halts the caller.
pub fn until<F>(mut predicate: F)
where
    F: FnMut() -> bool,
{
    while !predicate() {}
}
