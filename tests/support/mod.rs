#![allow(dead_code)]

pub mod sentimento_env;
