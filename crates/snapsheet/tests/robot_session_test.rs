//! Scripted robot session walking the snap ladder and dismissing.

use snapsheet::SheetConfig;
use snapsheet_testing::prelude::*;

#[test]
fn robot_session_walks_the_snap_ladder() {
    let mut robot = SheetRobot::new(SheetConfig::default(), 1000.0).unwrap();

    robot.open();
    assert_resting_at(robot.controller(), 700.0, "after open");

    // Slow swipe up past the switch threshold: lands on the middle point.
    robot.swipe_to(480.0, 2000);
    assert_eq!(robot.controller().active_snap_index(), 1);
    assert_resting_at(robot.controller(), 300.0, "after first swipe");

    // Again, up to full extension.
    robot.swipe_to(80.0, 2000);
    assert_eq!(robot.controller().active_snap_index(), 2);
    assert_resting_at(robot.controller(), 0.0, "fully extended");

    // A fast downward flick dismisses from anywhere.
    robot.swipe_to(150.0, 48);
    assert_resting_at(robot.controller(), 1000.0, "hidden");
    assert_eq!(robot.open_events(), vec![true, false]);
    assert_eq!(robot.snap_events(), vec![0.7, 1.0]);
}

#[test]
fn robot_resize_rescales_the_resting_sheet() {
    let mut robot = SheetRobot::new(SheetConfig::default(), 1000.0).unwrap();

    robot.open();
    robot.resize(800.0);
    assert_resting_at(robot.controller(), 560.0, "after resize");
    assert_approx_eq(robot.controller().active_snap_point(), 0.3, 0.0, "fraction kept");

    robot.close();
    assert_resting_at(robot.controller(), 800.0, "hidden at new extent");
}
