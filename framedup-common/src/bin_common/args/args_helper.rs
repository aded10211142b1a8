/// Declares a group of tunables once and generates two structs from it: `<Name>Cli`,
/// which can be flattened into a clap parser, and `<Name>`, a plain config with the same
/// defaults, getters and `with_*` setters, that library code takes as input.
///
/// Plain fields are written as `"help" name: Type = default;`, repeatable flags as
/// `[] "help" name: Vec<Type> = [defaults];` and nested groups as `name: OtherGroup;`.
#[macro_export]
macro_rules! args {
    ($(#$meta:tt)* $name:ident {
        $($fhelp:literal $fname:ident: $ftype:ty = $fdefault:expr;)*
        $([] $vhelp:literal $vname:ident: $vtype:ty = $vdefault:expr;)*
        $($mname:ident: $mtype:ident;)*
    }) => {
        $crate::bin_common::args::args_helper::paste! {
            #[derive(clap::Args, Debug, Clone)]
            pub struct [<$name Cli>] {
                $(
                    #[arg(long, default_value_t = ($fdefault), help = $fhelp)]
                    pub $fname: $ftype,
                )*

                $(
                    #[arg(long, default_values_t = ($vdefault), help = $vhelp)]
                    pub $vname: $vtype,
                )*

                $(
                    #[command(flatten)]
                    pub $mname: [<$mtype Cli>],
                )*
            }

            $(#$meta)*
            pub struct $name {
                $($fname: $ftype,)*
                $($vname: $vtype,)*
                $($mname: $mtype,)*
            }

            impl std::default::Default for $name {
                fn default() -> Self {
                    Self {
                        $($fname: $fdefault,)*
                        $($vname: $vdefault.into_iter().collect(),)*
                        $($mname: $mtype::default(),)*
                    }
                }
            }

            impl $name {
                $(
                    pub fn $fname(&self) -> $ftype {
                        self.$fname.clone()
                    }

                    pub fn [<with_ $fname>](mut self, $fname: $ftype) -> Self {
                        self.$fname = $fname;
                        self
                    }
                )*

                $(
                    pub fn $vname(&self) -> &$vtype {
                        &self.$vname
                    }

                    pub fn [<with_ $vname>](mut self, $vname: $vtype) -> Self {
                        self.$vname = $vname;
                        self
                    }
                )*

                $(
                    pub fn $mname(&self) -> &$mtype {
                        &self.$mname
                    }

                    pub fn [<with_ $mname>](mut self, $mname: $mtype) -> Self {
                        self.$mname = $mname;
                        self
                    }
                )*
            }

            impl std::convert::From<&[<$name Cli>]> for $name {
                fn from(cli: &[<$name Cli>]) -> Self {
                    Self {
                        $($fname: cli.$fname.clone(),)*
                        $($vname: cli.$vname.clone(),)*
                        $($mname: $mtype::from(&cli.$mname),)*
                    }
                }
            }
        }
    };
}

pub use args;
pub use paste::paste;
