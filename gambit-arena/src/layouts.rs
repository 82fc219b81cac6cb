//! Built-in layouts

use crate::board::Layout;

/// One runner, one chaser, food at the far end of a corridor
pub const CORRIDOR: &str = "\
%%%%%%%
%G P .%
%%%%%%%
";

/// The runner starts boxed in between two chasers
pub const TRAPPED: &str = "\
%%%%%%%%%%
%   G%.  %
% %P   % %
%G  %  . %
%%%%%%%%%%
";

/// Small open maze with two chasers and two capsules
pub const SMALL: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%o.%........%.o%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%
";

/// Open room, one chaser, a capsule between runner and chaser
pub const OPEN: &str = "\
%%%%%%%%%
%P  .  .%
%   o   %
%.     G%
%%%%%%%%%
";

pub const BUILTIN_NAMES: [&str; 4] = ["corridor", "trapped", "small", "open"];

/// Parse a built-in layout by name
pub fn builtin(name: &str) -> Option<Layout> {
    let text = match name {
        "corridor" => CORRIDOR,
        "trapped" => TRAPPED,
        "small" => SMALL,
        "open" => OPEN,
        _ => return None,
    };
    Layout::parse(name, text).ok()
}
