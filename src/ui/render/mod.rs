mod all;
mod confirmation;
mod footer;
mod form;
mod header;
mod log;

use self::log::log;
use super::*;
use confirmation::confirmation;
use footer::footer;
use form::form;
use header::header;

pub use all::all as render;
