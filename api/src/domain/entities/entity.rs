//! Entity descriptors
//!
//! The logical document collections the application persists. Each one is
//! reachable under the module path and export binding the application's
//! persistence client uses for it.

use serde::{Deserialize, Serialize};

/// A logical document collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    User,
    Chat,
    Community,
    Otp,
    TempNumber,
    Cart,
    Product,
    Poll,
    Login,
    Message,
}

impl Entity {
    pub const COUNT: usize = 10;

    pub const ALL: [Entity; Entity::COUNT] = [
        Entity::User,
        Entity::Chat,
        Entity::Community,
        Entity::Otp,
        Entity::TempNumber,
        Entity::Cart,
        Entity::Product,
        Entity::Poll,
        Entity::Login,
        Entity::Message,
    ];

    /// Position in [`Entity::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Entity::User => 0,
            Entity::Chat => 1,
            Entity::Community => 2,
            Entity::Otp => 3,
            Entity::TempNumber => 4,
            Entity::Cart => 5,
            Entity::Product => 6,
            Entity::Poll => 7,
            Entity::Login => 8,
            Entity::Message => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Chat => "chat",
            Entity::Community => "community",
            Entity::Otp => "otp",
            Entity::TempNumber => "temp_number",
            Entity::Cart => "cart",
            Entity::Product => "product",
            Entity::Poll => "poll",
            Entity::Login => "login",
            Entity::Message => "message",
        }
    }

    /// Module the application imports the model from
    pub const fn module_path(self) -> &'static str {
        match self {
            Entity::User => "Models/signupmodel",
            Entity::Chat => "Models/chatModel",
            Entity::Community => "Models/communityModel",
            Entity::Otp => "Models/otpmodel",
            Entity::TempNumber => "Models/tempNumStoringModel",
            Entity::Cart => "Models/cartModel",
            Entity::Product => "Models/productmodel",
            Entity::Poll => "Models/polsModel",
            Entity::Login => "Models/loginmodel",
            Entity::Message => "Models/msgModel",
        }
    }

    /// Name the model is exported under from its module
    pub const fn binding(self) -> &'static str {
        match self {
            Entity::User => "signupmodel",
            Entity::Chat => "chatModel",
            Entity::Community => "communityModel",
            Entity::Otp => "otpmodel",
            Entity::TempNumber => "tempNumModel",
            Entity::Cart => "cartModel",
            Entity::Product => "productmodel",
            Entity::Poll => "polsModel",
            Entity::Login => "loginmodel",
            Entity::Message => "msgModel",
        }
    }

    /// Extra spellings call sites use for the same binding
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Entity::Poll => &["pollmodel"],
            Entity::TempNumber => &["tempnummodel"],
            Entity::Message => &["msgmodel"],
            _ => &[],
        }
    }

    fn matches(self, name: &str) -> bool {
        let module = self.module_path();
        let file = module.rsplit('/').next().unwrap_or(module);

        name == self.name()
            || name.eq_ignore_ascii_case(module)
            || name.eq_ignore_ascii_case(file)
            || name.eq_ignore_ascii_case(self.binding())
            || self
                .aliases()
                .iter()
                .any(|alias| name.eq_ignore_ascii_case(alias))
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Entity {
    type Err = String;

    /// Accepts the entity name, its module path (optionally prefixed with
    /// `./` or `../`) or its export binding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut name = s.trim();
        while let Some(rest) = name
            .strip_prefix("../")
            .or_else(|| name.strip_prefix("./"))
        {
            name = rest;
        }

        Entity::ALL
            .into_iter()
            .find(|entity| entity.matches(name))
            .ok_or_else(|| format!("Unknown entity: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (position, entity) in Entity::ALL.into_iter().enumerate() {
            assert_eq!(entity.index(), position);
        }
    }

    #[test]
    fn parses_module_paths_with_relative_prefix() {
        assert_eq!("../Models/chatModel".parse::<Entity>(), Ok(Entity::Chat));
        assert_eq!(
            "./Models/tempNumStoringModel".parse::<Entity>(),
            Ok(Entity::TempNumber)
        );
        assert_eq!("Models/polsModel".parse::<Entity>(), Ok(Entity::Poll));
    }

    #[test]
    fn parses_bindings_and_aliases() {
        assert_eq!("signupModel".parse::<Entity>(), Ok(Entity::User));
        assert_eq!("chatmodel".parse::<Entity>(), Ok(Entity::Chat));
        assert_eq!("pollModel".parse::<Entity>(), Ok(Entity::Poll));
        assert_eq!("tempNumModel".parse::<Entity>(), Ok(Entity::TempNumber));
        assert_eq!("msgmodel".parse::<Entity>(), Ok(Entity::Message));
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("temp_number".parse::<Entity>(), Ok(Entity::TempNumber));
        assert_eq!("login".parse::<Entity>(), Ok(Entity::Login));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("Models/orderModel".parse::<Entity>().is_err());
        assert!("".parse::<Entity>().is_err());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(Entity::TempNumber.to_string(), "temp_number");
        assert_eq!(
            serde_json::to_string(&Entity::TempNumber).unwrap(),
            "\"temp_number\""
        );
    }
}
