mod guard;
mod login;
mod logout;
mod register;
mod status;
mod token;

pub use self::{
    guard::guard, login::login, logout::logout, register::register, status::status, token::token,
};
