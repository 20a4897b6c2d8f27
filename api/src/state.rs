use app::{locale::Formatter, Container};

use crate::pages::Templates;

pub struct RocketState {
    pub container: Container,
    pub formatter: Formatter,
    pub templates: Templates,
}
