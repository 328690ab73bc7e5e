use bcrypt::{BcryptResult, DEFAULT_COST};

pub fn hash(password: &str) -> BcryptResult<String> {
    bcrypt::hash(password, DEFAULT_COST)
}

pub fn verify(password: &str, hashed: &str) -> BcryptResult<bool> {
    bcrypt::verify(password, hashed)
}
