use alloy::sol;

// Contract ABIs using alloy sol! macro
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }

    #[sol(rpc)]
    interface IDepositor {
        function deposit(address token, uint256 amount) external payable;
        function mint(uint256 amountOut) external payable;
        function getDepositedAmount(address token) external view returns (uint256);
        function getDepositedValue(address token) external view returns (uint256);
        function getTotalDepositedValue() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IMinter {
        function getMaxOutput(address account) external view returns (uint256);
        function getMinted(address account) external view returns (uint256);
        function getHealthFactor(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IAggregatorV3 {
        function decimals() external view returns (uint8);
        function latestRoundData() external view returns (
            uint80 roundId,
            int256 answer,
            uint256 startedAt,
            uint256 updatedAt,
            uint80 answeredInRound
        );
    }
}
