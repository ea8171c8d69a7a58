//! 以字符串形式存库、传输的枚举

/// 定义字符串枚举
///
/// 自动生成：
/// - enum 定义（serde 按给定文本序列化，同时导出 TypeScript 类型）
/// - as_str() / ALL
/// - Display 与大小写不敏感的 FromStr
#[macro_export]
macro_rules! define_string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, ts_rs::TS,
        )]
        #[ts(export, export_to = "../frontend/src/types/generated/enums.ts")]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )*
                Err(format!("Invalid {}: '{}'", stringify!($name), s))
            }
        }
    };
}
