//! Email Shape Check
//!
//! Accepts `local@label.label.tld` where the local part is one or more of
//! `[A-Za-z0-9_.-]`, each domain label is one or more of `[A-Za-z0-9-]`, and
//! the trailing label is 2-4 ASCII letters. Syntax only; deliverability is
//! never checked.

const MIN_TLD_LEN: usize = 2;
const MAX_TLD_LEN: usize = 4;

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Whether `input` looks like an email address
pub fn is_valid_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let tld_ok = (MIN_TLD_LEN..=MAX_TLD_LEN).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic());

    tld_ok
        && labels
            .split('.')
            .all(|label| !label.is_empty() && label.chars().all(is_label_char))
}
